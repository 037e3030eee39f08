use crate::domain::ports::LabelPipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct LabelEngine<P: LabelPipeline> {
    pipeline: P,
}

impl<P: LabelPipeline> LabelEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract → transform → load and returns where the labels were written.
    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting {} label generation", self.pipeline.name());

        let input = self.pipeline.extract().await?;

        let batches = self.pipeline.transform(input).await?;
        let label_count: usize = batches.iter().map(|b| b.records.len()).sum();
        tracing::info!("Planned {} label(s) in {} batch(es)", label_count, batches.len());
        for batch in &batches {
            tracing::debug!("{}", batch.description);
        }

        let output_path = self.pipeline.load(batches).await?;
        tracing::info!(
            "{} labels saved to {} in {:?}",
            self.pipeline.name(),
            output_path,
            started.elapsed()
        );

        Ok(output_path)
    }
}
