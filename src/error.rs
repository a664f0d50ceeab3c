use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure kinds surfaced by the adapter.
///
/// `Validation` is always raised before any request leaves the process.
/// `Conflict` and `Backend` keep the backend's status so callers can forward it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),
    #[error("user {0} not found")]
    NotFound(String),
    #[error("{message}")]
    Conflict { message: String },
    #[error("{url} - {status}, {message}")]
    Backend {
        url: String,
        status: StatusCode,
        message: String,
    },
    #[error("transport error: {0}")]
    Transport(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn duplicate_user(business_key: &str) -> Self {
        Self::Conflict {
            message: format!("userID {business_key} already exists"),
        }
    }

    pub fn backend(url: impl Into<String>, status: StatusCode, message: impl Into<String>) -> Self {
        Self::Backend {
            url: url.into(),
            status,
            message: message.into(),
        }
    }

    /// Status code reported to callers for this failure.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST.as_u16(),
            Self::NotFound(_) => StatusCode::NOT_FOUND.as_u16(),
            Self::Conflict { .. } => StatusCode::CONFLICT.as_u16(),
            Self::Backend { status, .. } => status.as_u16(),
            Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }
    }

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(format!("invalid JSON body: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(Error::validation("bad").status_code(), 400);
        assert_eq!(Error::NotFound("alice01".to_string()).status_code(), 404);
        assert_eq!(Error::duplicate_user("alice01").status_code(), 409);
        assert_eq!(
            Error::backend("http://h/users", StatusCode::BAD_GATEWAY, "down").status_code(),
            502
        );
        assert_eq!(Error::Transport("reset".to_string()).status_code(), 500);
    }

    #[test]
    fn backend_error_message_includes_url_and_status() {
        let err = Error::backend(
            "http://localhost:8080/users/7",
            StatusCode::SERVICE_UNAVAILABLE,
            "failed to update user",
        );
        let message = err.to_string();
        assert!(message.contains("http://localhost:8080/users/7"));
        assert!(message.contains("503"));
        assert!(message.contains("failed to update user"));
    }

    #[test]
    fn json_errors_become_transport_errors() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let Err(err) = parse else {
            panic!("expected parse failure");
        };
        let err = Error::from(err);
        assert!(matches!(err, Error::Transport(_)));
        assert!(err.to_string().contains("invalid JSON body"));
    }
}
