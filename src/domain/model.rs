use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Artifact key for the published table.
pub const PROCESSED_DATA_KEY: &str = "processed-data";
/// Artifact key for failure reports.
pub const ERROR_KEY: &str = "error";

pub const DEFAULT_FIELDS: [&str; 2] = ["id", "title"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.data.get(field)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Record {
    fn from(obj: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            data: obj.into_iter().collect(),
        }
    }
}

/// Output of the transform stage. `columns` fixes the rendering order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedDataset {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl ProjectedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowOutcome {
    pub records_fetched: usize,
    pub rows_published: usize,
}
