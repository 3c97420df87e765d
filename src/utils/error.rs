use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

impl ServiceError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ServiceError::HttpClientError(_) => "Could not set up the outbound HTTP client".to_string(),
            ServiceError::IoError(e) => format!("A file or network operation failed: {}", e),
            ServiceError::ConfigError { message } => format!("Configuration problem: {}", message),
            ServiceError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            ServiceError::ConfigValidationError { field, message } => {
                format!("Setting '{}' could not be loaded: {}", field, message)
            }
        }
    }

    /// 建議的修復方式
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ServiceError::HttpClientError(_) => "Check the TLS setup of the host and try again",
            ServiceError::IoError(_) => {
                "Check that the config file exists and the bind address is free"
            }
            ServiceError::ConfigError { .. } | ServiceError::InvalidConfigValueError { .. } => {
                "Review the command-line flags and the TOML config file"
            }
            ServiceError::ConfigValidationError { .. } => {
                "Fix the syntax of the TOML config file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_message_names_the_field() {
        let err = ServiceError::InvalidConfigValueError {
            field: "http.request_timeout_seconds".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };

        assert!(err.to_string().contains("http.request_timeout_seconds"));
        assert!(err
            .user_friendly_message()
            .contains("Value must be at least 1"));
        assert_eq!(
            err.recovery_suggestion(),
            "Review the command-line flags and the TOML config file"
        );
    }

    #[test]
    fn test_config_variants_have_messages_and_suggestions() {
        let errors = [
            ServiceError::ConfigError {
                message: "bad pattern".to_string(),
            },
            ServiceError::ConfigValidationError {
                field: "config".to_string(),
                message: "expected `=`".to_string(),
            },
            ServiceError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
        ];
        for err in errors {
            assert!(!err.user_friendly_message().is_empty());
            assert!(!err.recovery_suggestion().is_empty());
        }
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "busy");
        let err: ServiceError = io.into();
        assert!(matches!(err, ServiceError::IoError(_)));
    }
}
