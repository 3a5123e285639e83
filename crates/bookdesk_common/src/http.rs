// --- File: crates/bookdesk_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{BookdeskError, HttpStatusCode};

pub mod client;

/// Serves an error as `{"error": {"message", "code"}}` with its mapped status.
pub trait IntoHttpResponse {
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for BookdeskError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

impl IntoResponse for BookdeskError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status() {
        let response = BookdeskError::NotFoundError("date 42".to_string()).into_http_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = BookdeskError::ConflictError("slot 09:00".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
