use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Failed to fetch data from {url}: {}", status_line(.status, .reason))]
    FetchError {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Schema error: {message}")]
    SchemaError { message: String },

    #[error("Schema error: record {index} is missing required field '{field}'")]
    MissingFieldError { index: usize, field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid artifact key '{key}': only lowercase letters, digits and dashes are allowed")]
    InvalidArtifactKey { key: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Schema,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::FetchError { .. } | EtlError::ApiError(_) => ErrorCategory::Network,
            EtlError::SchemaError { .. } | EtlError::MissingFieldError { .. } => {
                ErrorCategory::Schema
            }
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorCategory::Storage,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidArtifactKey { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Schema | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::FetchError { status, .. } if *status >= 500 => {
                "The source API is failing; try again later"
            }
            EtlError::FetchError { .. } => "Check that the endpoint URL is correct and reachable",
            EtlError::ApiError(_) => "Check network connectivity and the endpoint host",
            EtlError::SchemaError { .. } => "The endpoint must return a JSON array of objects",
            EtlError::MissingFieldError { .. } => {
                "Check --keep-only-fields against the fields the API actually returns"
            }
            EtlError::IoError(_) | EtlError::SerializationError(_) => {
                "Check that the output path is writable"
            }
            EtlError::InvalidArtifactKey { .. } => "Use lowercase letters, digits and dashes",
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => "Fix the configuration and run again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not retrieve data: {}", self),
            ErrorCategory::Schema => format!("Unexpected data from the source: {}", self),
            ErrorCategory::Storage => format!("Could not write the report: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

/// `404 Not Found`, or just `599` when the code has no canonical reason.
fn status_line(status: &u16, reason: &str) -> String {
    if reason.is_empty() {
        status.to_string()
    } else {
        format!("{} {}", status, reason)
    }
}
