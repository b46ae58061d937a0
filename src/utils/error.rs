use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Rules file parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid pattern in {field}: {source}")]
    PatternError {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Output,
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
            EtlError::InputNotFound { .. } => ErrorCategory::Input,
            EtlError::IoError(_) | EtlError::SerializationError(_) | EtlError::CsvError(_) => {
                ErrorCategory::Output
            }
            EtlError::TomlError(_)
            | EtlError::PatternError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Recoverable: the operator fixes the path and reruns.
            EtlError::InputNotFound { .. } => ErrorSeverity::Medium,
            EtlError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::InputNotFound { path } => format!("Error: File not found: {}", path),
            EtlError::IoError(e) => format!("Could not access the filesystem: {}", e),
            EtlError::SerializationError(e) => format!("Could not write JSON output: {}", e),
            EtlError::CsvError(e) => format!("Could not write CSV output: {}", e),
            EtlError::TomlError(e) => format!("The rules file is not valid TOML: {}", e),
            EtlError::PatternError { field, .. } => {
                format!("The pattern configured for {} is not a valid regex", field)
            }
            EtlError::ConfigValidationError { field, message } => {
                format!("Configuration value {} is invalid: {}", field, message)
            }
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value {} is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Check that the catalog export exists, or pass its location with --input"
            }
            ErrorCategory::Output => "Check that the output directory is writable and has space",
            ErrorCategory::Configuration => {
                "Fix the rules file or command-line flags; run without --rules to use the defaults"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
