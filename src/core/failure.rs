use crate::core::ArtifactSink;
use crate::domain::model::ERROR_KEY;
use crate::utils::error::Result;
use std::future::Future;

/// Turns a task failure into an `error` artifact, then hands the error back.
#[derive(Debug, Clone)]
pub struct FailureReporter<A: ArtifactSink> {
    sink: A,
}

pub fn error_report(task: &str, error: &dyn std::fmt::Display) -> String {
    format!("## Error in {}\n\n{}", task, error)
}

impl<A: ArtifactSink> FailureReporter<A> {
    pub fn new(sink: A) -> Self {
        Self { sink }
    }

    /// Runs `task` and reports its error, if any. The returned error is the
    /// one `task` produced, even when publishing the report fails.
    pub async fn guard<T, F>(&self, task_name: &str, task: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match task.await {
            Ok(value) => Ok(value),
            Err(error) => {
                tracing::error!("Task {} failed with error: {}", task_name, error);
                let report = error_report(task_name, &error);
                if let Err(report_error) =
                    self.sink.create_markdown_artifact(ERROR_KEY, &report).await
                {
                    tracing::warn!(
                        "Could not publish error report for {}: {}",
                        task_name,
                        report_error
                    );
                }
                Err(error)
            }
        }
    }
}
