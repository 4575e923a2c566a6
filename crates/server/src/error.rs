use std::time::Duration;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};
use zodiac_chart::ChartError;
use zodiac_export::json::ErrorDocument;

/// Failure of a request, mapped onto an HTTP status and a stable kind.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("invalid query string: {}", .0.body_text())]
    InvalidQuery(#[from] QueryRejection),
    #[error("ephemeris computation did not finish within {} ms", .0.as_millis())]
    Timeout(Duration),
    #[error("ephemeris worker failed: {0}")]
    Worker(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Chart(ChartError::InvalidDate { .. } | ChartError::InvalidBody(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::Chart(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Chart(err) => err.kind(),
            Self::InvalidQuery(_) => "InvalidQueryError",
            Self::Timeout(_) => "UpstreamTimeoutError",
            Self::Worker(_) => "InternalError",
        }
    }

    /// Log at a level matching who is at fault.
    pub fn log(&self) {
        if self.status().is_client_error() {
            warn!(kind = self.kind(), error = %self, "rejected request");
        } else {
            error!(kind = self.kind(), error = %self, "request failed");
        }
    }

    pub fn document(&self) -> ErrorDocument {
        ErrorDocument::new(self.kind(), self.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        (self.status(), Json(self.document())).into_response()
    }
}
