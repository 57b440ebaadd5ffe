use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlacekitError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Processing,
    Storage,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlacekitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::ProcessingError { .. } => ErrorCategory::Processing,
            Self::IoError(_) | Self::ZipError(_) => ErrorCategory::Storage,
            Self::SerializationError(_) => ErrorCategory::Serialization,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorSeverity::Medium
            }
            Self::ProcessingError { .. } | Self::SerializationError(_) => ErrorSeverity::High,
            Self::IoError(_) | Self::ZipError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ConfigValidationError { field, .. } | Self::InvalidConfigValueError { field, .. } => {
                format!("Check the '{}' setting in your configuration", field)
            }
            Self::ProcessingError { .. } => {
                "Inspect the input records; rerun without --strict to skip unrecognizable ones"
                    .to_string()
            }
            Self::SerializationError(_) => {
                "Make sure the input file contains valid JSON".to_string()
            }
            Self::IoError(_) => {
                "Verify the input/output paths exist and are writable".to_string()
            }
            Self::ZipError(_) => {
                "Check free disk space, or disable compression and retry".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ConfigValidationError { field, message } => {
                format!("Configuration problem ({}): {}", field, message)
            }
            Self::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for {} ({})", value, field, reason)
            }
            Self::ProcessingError { message } => format!("Processing failed: {}", message),
            Self::SerializationError(e) => format!("Could not parse input data: {}", e),
            Self::IoError(e) => format!("File access failed: {}", e),
            Self::ZipError(e) => format!("Could not write output archive: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlacekitError>;
