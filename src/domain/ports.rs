use crate::domain::model::{ProjectedDataset, Record};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn rename_file(
        &self,
        from: &str,
        to: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Destination for human-readable report artifacts.
pub trait ArtifactSink: Send + Sync {
    fn create_markdown_artifact(
        &self,
        key: &str,
        markdown: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn flow_name(&self) -> &str;
    fn api_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn keep_only_fields(&self) -> &[String];
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Record>>;
    async fn process(&self, data: Vec<Record>) -> Result<ProjectedDataset>;
    async fn publish(&self, data: ProjectedDataset) -> Result<()>;
}
