//! Admin credentials and session tokens.

pub mod password;
pub mod token;

use thiserror::Error;

pub use password::{hash_password, verify_password};
pub use token::{issue_token, verify_token, TokenClaims};

use crate::document::model::{SiteDocument, User};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("no signing secret configured")]
    MissingSecret,
    #[error("token error: {0}")]
    Token(String),
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Find `username` in the document and check `password` against it.
pub fn authenticate<'a>(
    document: &'a SiteDocument,
    username: &str,
    password: &str,
) -> Result<&'a User, AuthError> {
    document
        .user(username)
        .filter(|user| verify_password(password, &user.password))
        .ok_or(AuthError::InvalidCredentials)
}

/// The secret tokens are signed with: the document's own, else `fallback`.
pub fn signing_secret<'a>(document: &'a SiteDocument, fallback: Option<&'a str>) -> &'a str {
    if document.jwt_secret.is_empty() {
        fallback.unwrap_or_default()
    } else {
        &document.jwt_secret
    }
}
