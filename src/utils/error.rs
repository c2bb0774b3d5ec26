use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Trivia data unavailable: {message}")]
    DataUnavailable { message: String },

    #[error(
        "Cell ({category}, {clue}) is outside the {categories}x{clues_per_category} board"
    )]
    IndexOutOfRange {
        category: usize,
        clue: usize,
        categories: usize,
        clues_per_category: usize,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

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
    DataSource,
    Contract,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GameError {
    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::DataUnavailable {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DataUnavailable { .. } => ErrorCategory::DataSource,
            Self::IndexOutOfRange { .. } => ErrorCategory::Contract,
            Self::IoError(_) => ErrorCategory::System,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 重新開始一局即可恢復
            Self::DataUnavailable { .. } => ErrorSeverity::Medium,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::IndexOutOfRange { .. } | Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DataUnavailable { .. } => {
                "Could not load trivia categories from the data source".to_string()
            }
            Self::IndexOutOfRange { .. } => "That cell is not on the board".to_string(),
            Self::IoError(e) => format!("I/O failure: {}", e),
            Self::ConfigError { message } => format!("Bad configuration: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("Bad configuration in {}: {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Bad configuration in {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::DataSource => {
                "Check the network and the --base-url setting, then type 'restart'"
            }
            ErrorCategory::Contract => "This is a bug in the caller; only use rendered cell labels",
            ErrorCategory::Configuration => "Fix the command line flags or the TOML config file",
            ErrorCategory::System => "Check file permissions and the terminal state",
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_unavailable_is_recoverable() {
        let err = GameError::data_unavailable("pool exhausted");
        assert_eq!(err.category(), ErrorCategory::DataSource);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("pool exhausted"));
    }

    #[test]
    fn test_index_out_of_range_is_contract_violation() {
        let err = GameError::IndexOutOfRange {
            category: 6,
            clue: 0,
            categories: 6,
            clues_per_category: 5,
        };
        assert_eq!(err.category(), ErrorCategory::Contract);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.to_string(), "Cell (6, 0) is outside the 6x5 board");
    }
}
