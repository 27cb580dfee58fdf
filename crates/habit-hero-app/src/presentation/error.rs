use serde::Serialize;

use habit_hero_domain::shared::{DomainError, ErrorCode, ErrorSeverity};

/// Structured error reported by a CLI command
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[error("{message} (code {code})")]
pub struct CommandError {
    /// Numeric error code (1xxx-6xxx range)
    pub code: u16,
    pub message: String,
    pub severity: ErrorSeverity,
    pub recoverable: bool,
}

impl CommandError {
    pub fn from_code(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: error_code.code(),
            message: message.into(),
            severity: error_code.severity(),
            recoverable: error_code.is_recoverable(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::InfrastructureError, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::InvalidInput, message)
    }
}

impl From<DomainError> for CommandError {
    fn from(err: DomainError) -> Self {
        Self {
            code: err.code().code(),
            message: err.message().to_string(),
            severity: err.severity(),
            recoverable: err.is_recoverable(),
        }
    }
}

impl From<anyhow::Error> for CommandError {
    fn from(err: anyhow::Error) -> Self {
        Self::infrastructure(err.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_input(format!("Invalid JSON input: {}", err))
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_domain_error() {
        let err = CommandError::from(DomainError::Unauthorized("User not found".to_string()));
        assert_eq!(err.message, "User not found");
        assert_eq!(err.code, ErrorCode::Unauthorized.code());
        assert!(!err.recoverable);

        let err = CommandError::from(DomainError::Network("connection refused".to_string()));
        assert!(err.recoverable);
    }

    #[test]
    fn test_serializes_for_json_output() {
        let err = CommandError::invalid_input("bad");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["message"], "bad");
        assert!(json["code"].is_u64());
    }
}
