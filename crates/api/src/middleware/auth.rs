//! Bearer token gate for mutating routes.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;

use jis_site_core::auth::{signing_secret, verify_token, TokenClaims};

use crate::error::ApiError;
use crate::state::AppState;

/// Claims of an authenticated admin.
///
/// No `Authorization` header is a 401. A header that is not a valid,
/// unexpired Bearer token signed with the store's secret is a 403.
#[derive(Debug, Clone)]
pub struct AdminClaims(pub TokenClaims);

impl FromRequestParts<AppState> for AdminClaims {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Err(ApiError::Unauthorized("Authentication required".into()));
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    tracing::debug!(%rejection, "malformed authorization header");
                    ApiError::Forbidden("Invalid or expired token".into())
                })?;

        let document = state.store().load().await?;
        let secret = signing_secret(&document, state.config().jwt_secret.as_deref());
        let claims = verify_token(bearer.token(), secret)?;
        tracing::debug!(username = %claims.username, "authenticated admin request");
        Ok(AdminClaims(claims))
    }
}
