use axum::{extract::State, routing::get, Json, Router};
use serde_json::Value;

use jis_site_core::document::SiteSettings;
use jis_site_core::events::SiteEvent;
use jis_site_core::mutation::merge_shallow;

use crate::error::{ApiError, ApiResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AdminClaims;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/settings", get(get_settings).put(update_settings))
}

async fn get_settings(State(state): State<AppState>) -> ApiResult<Json<SiteSettings>> {
    let document = state.store().load().await?;
    Ok(Json(document.site_settings))
}

async fn update_settings(
    State(state): State<AppState>,
    _admin: AdminClaims,
    JsonBody(patch): JsonBody<Value>,
) -> ApiResult<Json<SiteSettings>> {
    let settings = state
        .store()
        .update(|doc| {
            doc.site_settings = merge_shallow(&doc.site_settings, patch, &[])?;
            Ok::<_, ApiError>(doc.site_settings.clone())
        })
        .await?;

    tracing::info!("site settings updated");
    state.event_bus().notify(SiteEvent::SettingsSaved);
    Ok(Json(settings))
}
