use thiserror::Error;

#[derive(Error, Debug)]
pub enum KotobaError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Invalid {entity} record {id}: {reason}")]
    InvalidRecordError {
        entity: &'static str,
        id: String,
        reason: String,
    },

    #[error("Unresolved {item_type} reference: {id}")]
    DanglingReferenceError { item_type: &'static str, id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl KotobaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            KotobaError::IoError(_) => ErrorCategory::Io,
            KotobaError::SerializationError(_)
            | KotobaError::InvalidRecordError { .. }
            | KotobaError::DanglingReferenceError { .. } => ErrorCategory::Data,
            KotobaError::ConfigError { .. }
            | KotobaError::ConfigValidationError { .. }
            | KotobaError::InvalidConfigValueError { .. }
            | KotobaError::MissingConfigError { .. } => ErrorCategory::Configuration,
            KotobaError::ZipError(_) | KotobaError::CsvError(_) | KotobaError::ProcessingError { .. } => {
                ErrorCategory::Export
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Export => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// Process exit status for a failed run, shared by both binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            KotobaError::IoError(_) => "Check that the input file exists and the output directory is writable",
            KotobaError::SerializationError(_) => {
                "Make sure the input is a JSON array of vocabulary records"
            }
            KotobaError::InvalidRecordError { .. } => {
                "Fix the record in the export or rerun with --skip-invalid"
            }
            KotobaError::DanglingReferenceError { .. } => {
                "Load the referenced vocabulary and kanji before resolving progress records"
            }
            KotobaError::ConfigError { .. }
            | KotobaError::ConfigValidationError { .. }
            | KotobaError::InvalidConfigValueError { .. }
            | KotobaError::MissingConfigError { .. } => "Review the configuration file and CLI flags",
            KotobaError::ZipError(_) | KotobaError::CsvError(_) | KotobaError::ProcessingError { .. } => {
                "Retry the export; if it keeps failing, disable compression"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not access a file: {}", self),
            ErrorCategory::Data => format!("The vocabulary data is not usable: {}", self),
            ErrorCategory::Configuration => format!("The configuration is invalid: {}", self),
            ErrorCategory::Export => format!("Writing the export failed: {}", self),
        }
    }

    pub(crate) fn invalid_record(
        entity: &'static str,
        id: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        KotobaError::InvalidRecordError {
            entity,
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KotobaError>;
