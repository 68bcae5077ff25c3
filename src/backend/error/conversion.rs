/**
 * Error Conversion
 *
 * All account errors implement `IntoResponse` from Axum, allowing them to be
 * returned directly from handlers.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 */

use axum::response::{IntoResponse, Json, Response};

use crate::backend::error::types::AccountError;

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AccountError::Unknown { cause } = &self {
            tracing::error!("Request failed with internal error: {}", cause);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
