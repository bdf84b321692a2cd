pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{ArtifactMetadata, LocalArtifactSink, LocalStorage};
pub use app::run_report_flow;
pub use config::toml_config::TomlConfig;
pub use crate::core::{flow::DataFlow, pipeline::ReportPipeline};
pub use domain::model::{FlowOutcome, ProjectedDataset, Record, ERROR_KEY, PROCESSED_DATA_KEY};
pub use utils::error::{EtlError, Result};
