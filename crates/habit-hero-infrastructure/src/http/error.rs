use habit_hero_domain::DomainError;
use reqwest::StatusCode;
use thiserror::Error;

/// Non-success HTTP answer, with the backend's `detail` message when it sent one
#[derive(Debug, Clone, Error)]
#[error("{operation} failed with status {status}: {detail}")]
pub struct HttpStatusError {
    pub operation: String,
    pub status: StatusCode,
    pub detail: String,
}

impl HttpStatusError {
    pub fn is_retryable(&self) -> bool {
        self.status.is_server_error() || self.status == StatusCode::TOO_MANY_REQUESTS
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
    }
}

/// Map an adapter failure onto the domain error taxonomy
pub fn to_domain_error(err: anyhow::Error) -> DomainError {
    if let Some(status_err) = err.downcast_ref::<HttpStatusError>() {
        if status_err.is_unauthorized() {
            return DomainError::Unauthorized(status_err.detail.clone());
        }
        return DomainError::Repository(status_err.to_string());
    }

    if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>() {
        if reqwest_err.is_decode() {
            return DomainError::Deserialization(format!("{:#}", err));
        }
        if reqwest_err.is_connect() || reqwest_err.is_timeout() || reqwest_err.is_request() {
            return DomainError::Network(format!("{:#}", err));
        }
    }

    if err.downcast_ref::<serde_json::Error>().is_some() {
        return DomainError::Deserialization(format!("{:#}", err));
    }

    DomainError::Infrastructure(format!("{:#}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: StatusCode) -> anyhow::Error {
        HttpStatusError {
            operation: "Load user data".to_string(),
            status,
            detail: "nope".to_string(),
        }
        .into()
    }

    #[test]
    fn test_auth_failures_map_to_unauthorized() {
        assert!(matches!(
            to_domain_error(status_error(StatusCode::UNAUTHORIZED)),
            DomainError::Unauthorized(_)
        ));
        assert!(matches!(
            to_domain_error(status_error(StatusCode::FORBIDDEN)),
            DomainError::Unauthorized(_)
        ));
    }

    #[test]
    fn test_other_statuses_map_to_repository() {
        let err = to_domain_error(status_error(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(matches!(err, DomainError::Repository(_)));
        assert!(err.message().contains("500"));
    }

    #[test]
    fn test_context_is_kept_through_mapping() {
        let err = anyhow::Error::from(status_error(StatusCode::NOT_FOUND));
        let err = err.context("Saving progress");
        assert!(matches!(to_domain_error(err), DomainError::Repository(_)));
    }

    #[test]
    fn test_json_errors_map_to_deserialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(
            to_domain_error(json_err.into()),
            DomainError::Deserialization(_)
        ));
    }

    #[test]
    fn test_retryable_statuses() {
        let retryable = |status| HttpStatusError {
            operation: String::new(),
            status,
            detail: String::new(),
        }
        .is_retryable();

        assert!(retryable(StatusCode::BAD_GATEWAY));
        assert!(retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(!retryable(StatusCode::BAD_REQUEST));
        assert!(!retryable(StatusCode::UNAUTHORIZED));
    }
}
