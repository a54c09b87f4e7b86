use thiserror::Error;

#[derive(Error, Debug)]
pub enum NutriError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Error fetching data for '{food}': {message}")]
    LookupFailed { food: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid {field}: {message}")]
    ValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Persistence,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl NutriError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        NutriError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            NutriError::ApiError(_) | NutriError::LookupFailed { .. } => ErrorCategory::Network,
            NutriError::CsvError(_) | NutriError::IoError(_) | NutriError::SerializationError(_) => {
                ErrorCategory::Persistence
            }
            NutriError::ConfigError { .. }
            | NutriError::MissingConfigError { .. }
            | NutriError::InvalidConfigValueError { .. }
            | NutriError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            NutriError::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Persistence => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 是否可在互動模式中繼續 (只有啟動配置錯誤是致命的)
    pub fn is_recoverable(&self) -> bool {
        self.category() != ErrorCategory::Configuration
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            NutriError::ApiError(e) if e.is_timeout() => {
                "The food database did not answer in time; try again or raise --timeout-seconds".to_string()
            }
            NutriError::ApiError(e) if e.status().is_some_and(|s| s.as_u16() == 403) => {
                "Check that the USDA API key is valid".to_string()
            }
            NutriError::ApiError(_) | NutriError::LookupFailed { .. } => {
                "Check your network connection and the API base URL".to_string()
            }
            NutriError::CsvError(_) | NutriError::IoError(_) | NutriError::SerializationError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
            NutriError::MissingConfigError { field } if field == "api_key" => {
                "Set USDA_API_KEY, pass --api-key, or add api.api_key to the config file".to_string()
            }
            NutriError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            NutriError::ConfigError { .. }
            | NutriError::InvalidConfigValueError { .. }
            | NutriError::ConfigValidationError { .. } => {
                "Fix the configuration file or command-line flags and restart".to_string()
            }
            NutriError::ValidationError { field, .. } => {
                format!("Re-enter a valid {}", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            NutriError::ApiError(_) => format!("Could not reach the food database: {}", self),
            NutriError::CsvError(_) | NutriError::IoError(_) | NutriError::SerializationError(_) => {
                format!("Error saving file: {}", self)
            }
            NutriError::ValidationError { message, .. } => format!("Invalid input: {}", message),
            _ => self.to_string(),
        }
    }

    /// 非互動子命令的退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, NutriError>;
