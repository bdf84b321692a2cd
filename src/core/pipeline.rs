use crate::core::markdown::render_markdown_table;
use crate::core::transform::project_fields;
use crate::core::{ArtifactSink, ConfigProvider, Pipeline, ProjectedDataset, Record};
use crate::domain::model::PROCESSED_DATA_KEY;
use crate::utils::error::{EtlError, Result};
use reqwest::{Client, StatusCode};

/// Fetches a JSON array, keeps the configured fields and publishes them as a
/// markdown table artifact.
pub struct ReportPipeline<A: ArtifactSink, C: ConfigProvider> {
    sink: A,
    config: C,
    client: Client,
}

impl<A: ArtifactSink, C: ConfigProvider> ReportPipeline<A, C> {
    pub fn new(sink: A, config: C) -> Self {
        Self {
            sink,
            config,
            client: Client::new(),
        }
    }
}

/// One GET against `url`. Anything but 200 is a [`EtlError::FetchError`].
pub async fn fetch_json_records(client: &Client, url: &str) -> Result<Vec<Record>> {
    tracing::debug!("Making API request to: {}", url);
    let response = client.get(url).send().await?;

    let status = response.status();
    tracing::debug!("API response status: {}", status);

    if status != StatusCode::OK {
        return Err(EtlError::FetchError {
            url: url.to_string(),
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        });
    }

    let json_data: serde_json::Value = response.json().await?;
    let serde_json::Value::Array(items) = json_data else {
        return Err(EtlError::SchemaError {
            message: format!("expected a JSON array from {}", url),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::Object(obj) => Ok(Record::from(obj)),
            other => Err(EtlError::SchemaError {
                message: format!("element {} is not an object: {}", index, other),
            }),
        })
        .collect()
}

#[async_trait::async_trait]
impl<A: ArtifactSink, C: ConfigProvider> Pipeline for ReportPipeline<A, C> {
    async fn fetch(&self) -> Result<Vec<Record>> {
        fetch_json_records(&self.client, self.config.api_endpoint()).await
    }

    async fn process(&self, data: Vec<Record>) -> Result<ProjectedDataset> {
        let projected = project_fields(data, self.config.keep_only_fields())?;
        tracing::info!("Processed data:\n{}", render_markdown_table(&projected));
        Ok(projected)
    }

    async fn publish(&self, data: ProjectedDataset) -> Result<()> {
        let table = render_markdown_table(&data);
        self.sink
            .create_markdown_artifact(PROCESSED_DATA_KEY, &table)
            .await?;
        tracing::debug!("Published {} rows under '{}'", data.len(), PROCESSED_DATA_KEY);
        Ok(())
    }
}
