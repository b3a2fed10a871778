// JSON error responses: `{"error": "..."}` with a matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use dleague_app::ServiceError;
use dleague_core::source::FetchError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Failed to fetch draft data")]
    Upstream(#[source] FetchError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Service(ServiceError::UnknownSeason(_)) => StatusCode::NOT_FOUND,
            ApiError::Service(ServiceError::SeasonLocked(_)) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Upstream(source) = &self {
            warn!(error = %source, "upstream draft fetch failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::from(ServiceError::UnknownSeason(4)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(ServiceError::SeasonLocked(2)).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Upstream(FetchError::NotConfigured).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn messages() {
        assert_eq!(
            ApiError::from(ServiceError::SeasonLocked(2)).to_string(),
            "Season 2 is locked"
        );
        assert_eq!(
            ApiError::Upstream(FetchError::Status { status: 500 }).to_string(),
            "Failed to fetch draft data"
        );
    }
}
