// Adapters layer: concrete implementations of the domain ports.

pub mod artifacts;
pub mod storage;

pub use artifacts::{ArtifactMetadata, LocalArtifactSink};
pub use storage::LocalStorage;
