use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("At least one output target (excel, tsv or igv) must be given")]
    NoOutputTarget,

    #[error("Record {record} is missing declared field '{field}'")]
    MissingField { field: String, record: usize },

    #[error("Invalid position '{value}' for region export")]
    InvalidPosition { value: String },

    #[error("Malformed input in {source_name} line {line}: {message}")]
    InputFormatError {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    InputData,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::NoOutputTarget
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::TomlError(_) => ErrorCategory::Configuration,
            ReportError::MissingField { .. }
            | ReportError::InvalidPosition { .. }
            | ReportError::InputFormatError { .. }
            | ReportError::CsvError(_) => ErrorCategory::InputData,
            ReportError::ZipError(_) => ErrorCategory::Output,
            ReportError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::InputData => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReportError::NoOutputTarget => {
                "Pass at least one of --excel, --tsv or --igv".to_string()
            }
            ReportError::MissingField { field, .. } => format!(
                "Check that the annotation step produced a '{}' column for every variant",
                field
            ),
            ReportError::InvalidPosition { .. } => {
                "POS must be a positive 1-based integer".to_string()
            }
            ReportError::InputFormatError { source_name, .. } => {
                format!("Check that {} is a tab-separated table with one header line", source_name)
            }
            ReportError::TomlError(_) => {
                "Check the configuration file syntax".to_string()
            }
            ReportError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' in the configuration", field)
            }
            ReportError::CsvError(_) => "Check the input table for encoding problems".to_string(),
            ReportError::ZipError(_) | ReportError::IoError(_) => {
                "Check that the paths exist and are writable".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::InputData => format!("Could not process input: {}", self),
            ErrorCategory::Output => format!("Could not write report: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
