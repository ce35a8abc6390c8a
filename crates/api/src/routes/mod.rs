pub mod auth;
pub mod forms;
pub mod health;
pub mod pages;
pub mod popups;
pub mod render;
pub mod settings;
pub mod theme;
pub mod upload;

use axum::Router;

use crate::error::ApiError;
use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(settings::routes())
        .merge(pages::routes())
        .merge(forms::routes())
        .merge(theme::routes())
        .merge(popups::routes())
        .merge(upload::routes(&state))
        .merge(render::routes())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".into())
}
