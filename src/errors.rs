use crate::models::{Notice, NoticeKind};
use axum::{http::StatusCode, Json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoteError {
    #[error("vote service unreachable: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("vote service returned an unexpected payload: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("a vote has already been cast in this session")]
    AlreadyVoted,

    #[error("a vote is already being submitted")]
    VoteInFlight,

    #[error("vote service did not accept the vote")]
    ServerRejected,
}

impl VoteError {
    /// Local guard outcomes rather than failures.
    pub fn is_informational(&self) -> bool {
        matches!(self, VoteError::AlreadyVoted | VoteError::VoteInFlight)
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            VoteError::NetworkFailure(_) | VoteError::MalformedResponse(_) | VoteError::ServerRejected
        )
    }

    pub fn kind(&self) -> NoticeKind {
        match self {
            VoteError::AlreadyVoted => NoticeKind::AlreadyVoted,
            VoteError::VoteInFlight => NoticeKind::InFlight,
            VoteError::ServerRejected => NoticeKind::Rejected,
            VoteError::NetworkFailure(_) | VoteError::MalformedResponse(_) => NoticeKind::Failed,
        }
    }

    pub fn notice(&self) -> Notice {
        self.kind().notice()
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub notice: Notice,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            notice: Notice::error("Invalid vote", message),
        }
    }
}

impl From<VoteError> for AppError {
    fn from(err: VoteError) -> Self {
        let status = match err {
            VoteError::AlreadyVoted | VoteError::VoteInFlight => StatusCode::CONFLICT,
            VoteError::ServerRejected => StatusCode::UNPROCESSABLE_ENTITY,
            VoteError::NetworkFailure(_) | VoteError::MalformedResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
        };
        Self {
            status,
            notice: err.notice(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.notice)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoticeLevel;

    #[test]
    fn guard_errors_are_informational_conflicts() {
        for err in [VoteError::AlreadyVoted, VoteError::VoteInFlight] {
            assert!(err.is_informational());
            assert!(!err.is_retryable());
            let app: AppError = err.into();
            assert_eq!(app.status, StatusCode::CONFLICT);
            assert_eq!(app.notice.level, NoticeLevel::Info);
        }
    }

    #[test]
    fn rejection_is_retryable_error_notice() {
        let err = VoteError::ServerRejected;
        assert!(err.is_retryable());
        let app: AppError = err.into();
        assert_eq!(app.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(app.notice.level, NoticeLevel::Error);
    }

    #[test]
    fn malformed_payload_maps_to_bad_gateway() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = VoteError::from(parse_err);
        assert!(err.is_retryable());
        let app: AppError = err.into();
        assert_eq!(app.status, StatusCode::BAD_GATEWAY);
        assert_eq!(app.notice, NoticeKind::Failed.notice());
        assert_eq!(app.notice.level, NoticeLevel::Error);
    }
}
