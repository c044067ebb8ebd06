use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use ventura_engine::{InvestError, StoreError};
use ventura_types::api::ErrorBody;

/// Errors surfaced to API clients.
///
/// Invalid input never costs the player anything: a rejected wager
/// is a structured 4xx and the pending offer stays intact.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing or malformed player token")]
    MissingToken,
    #[error("unknown player token")]
    UnknownToken,
    #[error("not your session")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Invest(#[from] InvestError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingToken | ApiError::UnknownToken => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::InvalidName) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NameTaken) => StatusCode::CONFLICT,
            ApiError::Store(StoreError::PlayerNotFound | StoreError::SessionNotFound) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Store(StoreError::SessionFinished) => StatusCode::CONFLICT,
            ApiError::Invest(InvestError::SessionFinished | InvestError::NoPendingPitch) => {
                StatusCode::CONFLICT
            }
            ApiError::Invest(InvestError::BelowMinimum { .. } | InvestError::ExceedsCapital { .. }) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::Store(StoreError::NameTaken).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Invest(InvestError::BelowMinimum {
                min: 2_000,
                capital: 10_000
            })
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Invest(InvestError::NoPendingPitch).status(),
            StatusCode::CONFLICT
        );
    }
}
