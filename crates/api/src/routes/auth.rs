use axum::{extract::State, routing::post, Json, Router};

use jis_site_core::auth::{authenticate, issue_token, signing_secret};
use jis_site_core::mutation::{Credentials, TokenResponse};

use crate::error::ApiResult;
use crate::extract::JsonBody;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/auth/login", post(login))
}

/// Exchange admin credentials for a bearer token.
async fn login(
    State(state): State<AppState>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> ApiResult<Json<TokenResponse>> {
    let document = state.store().load().await?;
    let user = authenticate(&document, &credentials.username, &credentials.password).map_err(|err| {
        tracing::info!(username = %credentials.username, "rejected login");
        err
    })?;

    let secret = signing_secret(&document, state.config().jwt_secret.as_deref());
    let token = issue_token(user, secret, state.config().token_ttl_secs)?;

    tracing::info!(username = %user.username, "admin logged in");
    Ok(Json(TokenResponse { token }))
}
