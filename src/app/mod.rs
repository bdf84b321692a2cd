// Application layer: wires adapters and the pipeline into a runnable flow.

use crate::adapters::{LocalArtifactSink, LocalStorage};
use crate::core::flow::DataFlow;
use crate::core::pipeline::ReportPipeline;
use crate::core::{ConfigProvider, FlowOutcome};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Validates `config`, then fetches, projects and publishes into
/// `config.output_path()`. Failures leave an `error` artifact there too.
pub async fn run_report_flow<C>(config: C) -> Result<FlowOutcome>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;

    let flow_name = config.flow_name().to_string();
    let storage = LocalStorage::new(config.output_path().to_string());
    let sink = LocalArtifactSink::new(storage, flow_name.clone());

    tracing::debug!(
        "Flow '{}': endpoint={}, fields={:?}, output={}",
        flow_name,
        config.api_endpoint(),
        config.keep_only_fields(),
        config.output_path()
    );

    let output_path = config.output_path().to_string();
    let pipeline = ReportPipeline::new(sink.clone(), config);
    let outcome = DataFlow::new(flow_name, pipeline, sink).run().await?;
    tracing::info!("📁 Artifacts saved to: {}", output_path);
    Ok(outcome)
}
