use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Give 413s raised before a handler runs the usual `{ "error" }` body.
///
/// `RequestBodyLimitLayer` answers an oversized `Content-Length` with plain
/// text. Handler rejections are already JSON and pass through untouched.
pub async fn payload_too_large_as_json(response: Response) -> Response {
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE || is_json(&response) {
        return response;
    }
    ApiError::PayloadTooLarge("Request body too large".into()).into_response()
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}
