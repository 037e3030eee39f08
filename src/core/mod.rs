pub mod aggregator;
pub mod area_grouper;
pub mod batching;
pub mod chunk_planner;
pub mod destination;
pub mod engine;
pub mod label_indexer;
pub mod output;
pub mod splitter;

pub use crate::domain::model::{LabelBatch, LabelChunk, LabelGroup};
pub use crate::domain::ports::{ConfigProvider, LabelPipeline, Storage};
pub use crate::utils::error::Result;
