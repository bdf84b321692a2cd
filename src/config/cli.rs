use super::{DEFAULT_API_ENDPOINT, DEFAULT_FLOW_NAME, DEFAULT_OUTPUT_PATH};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_field_list, validate_path, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "data-flow")]
#[command(about = "Fetch JSON records, keep selected fields and publish a markdown report")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "id,title")]
    pub keep_only_fields: Vec<String>,

    #[arg(long, default_value = DEFAULT_FLOW_NAME)]
    pub flow_name: String,

    /// TOML configuration file; replaces the flags above when given
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn flow_name(&self) -> &str {
        &self.flow_name
    }

    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn keep_only_fields(&self) -> &[String] {
        &self.keep_only_fields
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_path("output_path", &self.output_path)?;
        validate_field_list("keep_only_fields", &self.keep_only_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["data-flow"]);

        assert_eq!(config.api_endpoint(), DEFAULT_API_ENDPOINT);
        assert_eq!(config.output_path(), "./artifacts");
        assert_eq!(config.keep_only_fields(), ["id", "title"]);
        assert_eq!(config.flow_name(), "data_flow");
        assert!(config.config.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_field_list_flag() {
        let config = CliConfig::parse_from([
            "data-flow",
            "--api-endpoint",
            "http://localhost:8080/users",
            "--keep-only-fields",
            "id,name,email",
        ]);

        assert_eq!(config.keep_only_fields(), ["id", "name", "email"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let config = CliConfig::parse_from(["data-flow", "--api-endpoint", "ftp://example.com"]);
        assert!(config.validate().is_err());
    }
}
