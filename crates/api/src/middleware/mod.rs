pub mod auth;
pub mod body_limit;
pub mod cors;
pub mod error_detail;
pub mod request_tracing;
pub mod security_headers;
