use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;
use crate::errors::TriageError;

impl IntoResponse for TriageError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            TriageError::MalformedIdentifier(_) => StatusCode::BAD_REQUEST,
            TriageError::PrimarySourceUnreachable(_) | TriageError::Network(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        }

        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
