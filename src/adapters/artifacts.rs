use crate::adapters::storage::LocalStorage;
use crate::core::{ArtifactSink, Storage};
use crate::utils::error::Result;
use crate::utils::validation::validate_artifact_key;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sidecar written next to every artifact body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub key: String,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub flow_name: String,
    pub created: DateTime<Utc>,
    pub size_bytes: usize,
}

/// Persists artifacts as `{key}.md` plus `{key}.json` through a [`Storage`].
/// Re-publishing a key overwrites the previous version.
#[derive(Debug, Clone)]
pub struct LocalArtifactSink<S: Storage = LocalStorage> {
    storage: S,
    flow_name: String,
}

impl<S: Storage> LocalArtifactSink<S> {
    pub fn new(storage: S, flow_name: impl Into<String>) -> Self {
        Self {
            storage,
            flow_name: flow_name.into(),
        }
    }

    pub async fn read_artifact(&self, key: &str) -> Result<String> {
        validate_artifact_key(key)?;
        let bytes = self.storage.read_file(&format!("{}.md", key)).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub async fn read_metadata(&self, key: &str) -> Result<ArtifactMetadata> {
        validate_artifact_key(key)?;
        let bytes = self.storage.read_file(&format!("{}.json", key)).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl<S: Storage> LocalArtifactSink<S> {
    /// Writes both files under temporary names, then moves the sidecar and
    /// finally the body into place. `{key}.md` only appears once everything
    /// before it succeeded.
    async fn stage_and_commit(
        &self,
        key: &str,
        staged: &[(String, &[u8])],
    ) -> Result<()> {
        for (tmp_path, data) in staged {
            self.storage.write_file(tmp_path, data).await?;
        }
        self.storage
            .rename_file(&format!("{}.json.tmp", key), &format!("{}.json", key))
            .await?;
        self.storage
            .rename_file(&format!("{}.md.tmp", key), &format!("{}.md", key))
            .await
    }
}

impl<S: Storage> ArtifactSink for LocalArtifactSink<S> {
    async fn create_markdown_artifact(&self, key: &str, markdown: &str) -> Result<()> {
        validate_artifact_key(key)?;

        let metadata = ArtifactMetadata {
            key: key.to_string(),
            artifact_type: "markdown".to_string(),
            flow_name: self.flow_name.clone(),
            created: Utc::now(),
            size_bytes: markdown.len(),
        };
        let sidecar = serde_json::to_vec_pretty(&metadata)?;

        let staged = [
            (format!("{}.md.tmp", key), markdown.as_bytes()),
            (format!("{}.json.tmp", key), sidecar.as_slice()),
        ];
        if let Err(e) = self.stage_and_commit(key, &staged).await {
            for (tmp_path, _) in &staged {
                // absent when the failure happened before or after this file's step
                let _ = self.storage.remove_file(tmp_path).await;
            }
            return Err(e);
        }

        tracing::debug!("Artifact '{}' written ({} bytes)", key, markdown.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        fail_on: Option<String>,
    }

    impl MockStorage {
        fn failing_on(path: &str) -> Self {
            Self {
                fail_on: Some(path.to_string()),
                ..Default::default()
            }
        }

        fn check(&self, path: &str) -> Result<()> {
            if self.fail_on.as_deref() == Some(path) {
                return Err(EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("cannot write {}", path),
                )));
            }
            Ok(())
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.check(path)?;
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        async fn rename_file(&self, from: &str, to: &str) -> Result<()> {
            self.check(to)?;
            let mut files = self.files.lock().await;
            let data = files.remove(from).ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", from),
                ))
            })?;
            files.insert(to.to_string(), data);
            Ok(())
        }

        async fn remove_file(&self, path: &str) -> Result<()> {
            self.files.lock().await.remove(path);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_artifact_written_with_metadata() {
        let storage = MockStorage::default();
        let sink = LocalArtifactSink::new(storage.clone(), "data_flow");

        sink.create_markdown_artifact("processed-data", "| a |")
            .await
            .unwrap();

        assert_eq!(sink.read_artifact("processed-data").await.unwrap(), "| a |");

        let metadata = sink.read_metadata("processed-data").await.unwrap();
        assert_eq!(metadata.key, "processed-data");
        assert_eq!(metadata.artifact_type, "markdown");
        assert_eq!(metadata.flow_name, "data_flow");
        assert_eq!(metadata.size_bytes, 5);

        let files = storage.files.lock().await;
        assert_eq!(files.len(), 2);
    }

    #[tokio::test]
    async fn test_republishing_key_overwrites() {
        let sink = LocalArtifactSink::new(MockStorage::default(), "data_flow");

        sink.create_markdown_artifact("error", "first").await.unwrap();
        sink.create_markdown_artifact("error", "second").await.unwrap();

        assert_eq!(sink.read_artifact("error").await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_invalid_key_rejected_before_write() {
        let storage = MockStorage::default();
        let sink = LocalArtifactSink::new(storage.clone(), "data_flow");

        let result = sink.create_markdown_artifact("../Etc", "x").await;

        assert!(matches!(result, Err(EtlError::InvalidArtifactKey { .. })));
        assert!(storage.files.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_sidecar_leaves_no_body_behind() {
        let storage = MockStorage::failing_on("processed-data.json");
        let sink = LocalArtifactSink::new(storage.clone(), "data_flow");

        let result = sink.create_markdown_artifact("processed-data", "| a |").await;

        assert!(matches!(result, Err(EtlError::IoError(_))));
        assert!(storage.files.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_staging_cleans_temporary_files() {
        let storage = MockStorage::failing_on("error.json.tmp");
        let sink = LocalArtifactSink::new(storage.clone(), "data_flow");

        let result = sink.create_markdown_artifact("error", "boom").await;

        assert!(result.is_err());
        assert!(storage.files.lock().await.is_empty());
    }
}
