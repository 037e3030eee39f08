use anyhow::Context;
use clap::Parser;
use label_engine::config::toml_config::LogFormat;
use label_engine::config::{Cli, Command};
use label_engine::core::LabelPipeline;
use label_engine::utils::validation::{self, Validate, ELABORATION_DATE_FORMAT};
use label_engine::utils::logger;
use label_engine::{
    HorecaLabelPipeline, HorecaRequest, JsonSnapshot, LabelConfig, LabelEngine, LabelError,
    LocalStorage, NutritionalLabelPipeline, NutritionalRequest,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => LabelConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => LabelConfig::default(),
    };
    if let Some(output_path) = &cli.output_path {
        config.output.output_path = output_path.clone();
    }
    if cli.archive {
        config.output.archive = true;
    }
    let verbose = cli.verbose || config.logging.verbose;

    match config.logging.format {
        LogFormat::Compact => logger::init_cli_logger(verbose),
        LogFormat::Json => logger::init_json_logger(verbose),
    }

    tracing::info!("Starting label-engine");
    tracing::debug!("Config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(e);
    }

    match run(cli, config).await {
        Ok(output_path) => {
            println!("✅ Labels generated");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

async fn run(cli: Cli, config: LabelConfig) -> Result<String, LabelError> {
    let input_storage = LocalStorage::new(".");
    let output_storage = LocalStorage::new(config.output.output_path.clone());

    match cli.command {
        Command::Horeca {
            input,
            order_ids,
            elaboration_date,
        } => {
            let source = JsonSnapshot::load(&input_storage, &input).await?;
            let request = HorecaRequest {
                order_ids,
                elaboration_date: elaboration_date_or_today(elaboration_date)?,
            };
            let pipeline = HorecaLabelPipeline::new(source, output_storage, config, request);
            execute(pipeline, cli.dry_run).await
        }
        Command::Nutritional {
            input,
            product_ids,
            quantities,
            production_order_code,
            elaboration_date,
        } => {
            let catalog = JsonSnapshot::load(&input_storage, &input).await?;
            let request = NutritionalRequest {
                product_ids,
                quantities: quantities.into_iter().collect(),
                elaboration_date: elaboration_date_or_today(elaboration_date)?,
                production_order_code,
            };
            let pipeline = NutritionalLabelPipeline::new(catalog, output_storage, config, request);
            execute(pipeline, cli.dry_run).await
        }
    }
}

async fn execute<P: LabelPipeline>(pipeline: P, dry_run: bool) -> Result<String, LabelError> {
    let engine = LabelEngine::new(pipeline);
    if !dry_run {
        return engine.run().await;
    }

    tracing::info!("🔍 DRY RUN MODE - nothing will be written");
    let pipeline = engine.pipeline();
    let input = pipeline.extract().await?;
    let batches = pipeline.transform(input).await?;
    for batch in &batches {
        tracing::info!("{}", batch.description);
    }
    Ok(format!("(dry run) {} batch(es)", batches.len()))
}

fn elaboration_date_or_today(value: Option<String>) -> Result<String, LabelError> {
    match value {
        Some(value) => {
            validation::validate_elaboration_date("elaboration_date", &value)?;
            Ok(value)
        }
        None => Ok(chrono::Local::now().format(ELABORATION_DATE_FORMAT).to_string()),
    }
}

fn exit_with(e: LabelError) -> ! {
    tracing::error!(
        "❌ Label generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}
