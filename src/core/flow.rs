use crate::core::failure::FailureReporter;
use crate::core::{ArtifactSink, Pipeline};
use crate::domain::model::FlowOutcome;
use crate::utils::error::Result;

pub const FETCH_TASK: &str = "fetch_data";
pub const PROCESS_TASK: &str = "process_data";
pub const PUBLISH_TASK: &str = "publish_data";

/// Runs fetch, process and publish in order. Each stage is guarded by the
/// [`FailureReporter`]; the first failure ends the run.
pub struct DataFlow<P: Pipeline, A: ArtifactSink> {
    name: String,
    pipeline: P,
    reporter: FailureReporter<A>,
}

impl<P: Pipeline, A: ArtifactSink> DataFlow<P, A> {
    pub fn new(name: impl Into<String>, pipeline: P, error_sink: A) -> Self {
        Self {
            name: name.into(),
            pipeline,
            reporter: FailureReporter::new(error_sink),
        }
    }

    pub async fn run(&self) -> Result<FlowOutcome> {
        tracing::info!("Starting flow '{}'", self.name);

        let raw_data = self
            .reporter
            .guard(FETCH_TASK, self.pipeline.fetch())
            .await?;
        let records_fetched = raw_data.len();
        tracing::info!("Fetched {} records", records_fetched);

        let processed = self
            .reporter
            .guard(PROCESS_TASK, self.pipeline.process(raw_data))
            .await?;
        let rows_published = processed.len();
        tracing::info!(
            "Kept {} of {} records with fields {:?}",
            rows_published,
            records_fetched,
            processed.columns
        );

        self.reporter
            .guard(PUBLISH_TASK, self.pipeline.publish(processed))
            .await?;
        tracing::info!("Flow '{}' finished", self.name);

        Ok(FlowOutcome {
            records_fetched,
            rows_published,
        })
    }
}
