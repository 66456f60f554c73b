use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Storage error: {message}")]
    StorageError { message: String },

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

    #[error("{message}")]
    ValidationError { message: String },

    #[error("Invalid seed ID: {id}")]
    UnknownSeed { id: i64 },

    #[error("Seed {name} is out of stock.")]
    OutOfStock { id: i64, name: String },

    #[error("Store is busy (waited {waited_ms} ms), please retry")]
    Busy { waited_ms: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Stock,
    Concurrency,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SeedError {
    pub fn validation(message: impl Into<String>) -> Self {
        SeedError::ValidationError {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        SeedError::StorageError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SeedError::ValidationError { .. } => ErrorCategory::Request,
            SeedError::UnknownSeed { .. } | SeedError::OutOfStock { .. } => ErrorCategory::Stock,
            SeedError::Busy { .. } => ErrorCategory::Concurrency,
            SeedError::CsvError(_)
            | SeedError::IoError(_)
            | SeedError::SerializationError(_)
            | SeedError::StorageError { .. } => ErrorCategory::Storage,
            SeedError::ConfigError { .. }
            | SeedError::ConfigValidationError { .. }
            | SeedError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request | ErrorCategory::Stock => ErrorSeverity::Low,
            ErrorCategory::Concurrency => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 可由用戶端重送的暫時性錯誤
    pub fn is_retryable(&self) -> bool {
        matches!(self, SeedError::Busy { .. })
    }

    /// 呈現給使用者的訊息，不含儲存層細節
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Request | ErrorCategory::Stock => self.to_string(),
            ErrorCategory::Concurrency => {
                "The server is busy processing other requests. Please try again.".to_string()
            }
            ErrorCategory::Storage => "Failed to process request".to_string(),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SeedError::ValidationError { .. } => "Check the submitted fields and try again",
            SeedError::UnknownSeed { .. } | SeedError::OutOfStock { .. } => {
                "Reload the seed list and choose seeds that are still in stock"
            }
            SeedError::Busy { .. } => "Resubmit the request in a moment",
            SeedError::CsvError(_) => "Make sure the CSV has the columns id, family, name, quantity",
            SeedError::IoError(_) | SeedError::StorageError { .. } => {
                "Check that the data directory exists and is writable"
            }
            SeedError::SerializationError(_) => {
                "Check that the data files contain valid JSON or restore them from a backup"
            }
            SeedError::ConfigError { .. }
            | SeedError::ConfigValidationError { .. }
            | SeedError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and restart the server"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SeedError>;
