use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::ErrorDetail;

/// Development only: replace the masked 500 body with the logged cause.
pub async fn expose_error_detail(mut response: Response) -> Response {
    match response.extensions_mut().remove::<ErrorDetail>() {
        Some(ErrorDetail(detail)) => {
            (response.status(), Json(json!({ "error": detail }))).into_response()
        }
        None => response,
    }
}
