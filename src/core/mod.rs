pub mod failure;
pub mod flow;
pub mod markdown;
pub mod pipeline;
pub mod transform;

pub use crate::domain::model::{FlowOutcome, ProjectedDataset, Record};
pub use crate::domain::ports::{ArtifactSink, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
