use crate::core::ConfigProvider;
use crate::domain::model::DEFAULT_FIELDS;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_field_list, validate_non_empty_string, validate_path, validate_url, Validate,
};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use super::{DEFAULT_FLOW_NAME, DEFAULT_OUTPUT_PATH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub flow: FlowConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    #[serde(default)]
    pub publish: PublishConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    #[serde(default = "default_flow_name")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    #[serde(default = "default_fields")]
    pub keep_only_fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

fn default_flow_name() -> String {
    DEFAULT_FLOW_NAME.to_string()
}

fn default_fields() -> Vec<String> {
    DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect()
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            name: default_flow_name(),
        }
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            keep_only_fields: default_fields(),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses after replacing `${VAR}` placeholders from the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_toml_str_with(content, |name| std::env::var(name).ok())
    }

    pub fn from_toml_str_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let processed_content = substitute_vars(content, lookup)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }
}

fn substitute_vars<F>(content: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing = Vec::new();
    let result = env_var_pattern().replace_all(content, |caps: &Captures| {
        let var_name = &caps[1];
        lookup(var_name).unwrap_or_else(|| {
            missing.push(var_name.to_string());
            String::new()
        })
    });

    if !missing.is_empty() {
        return Err(EtlError::ConfigError {
            message: format!("unset environment variable(s): {}", missing.join(", ")),
        });
    }

    Ok(result.into_owned())
}

impl ConfigProvider for TomlConfig {
    fn flow_name(&self) -> &str {
        &self.flow.name
    }

    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn output_path(&self) -> &str {
        &self.publish.output_path
    }

    fn keep_only_fields(&self) -> &[String] {
        &self.transform.keep_only_fields
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("flow.name", &self.flow.name)?;
        validate_url("source.endpoint", &self.source.endpoint)?;
        validate_field_list("transform.keep_only_fields", &self.transform.keep_only_fields)?;
        validate_path("publish.output_path", &self.publish.output_path)
    }
}
