//! Header and footer slots.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use jis_site_core::document::validate::validate_blocks;
use jis_site_core::document::{SiteDocument, SlotOwner, ThemeSlot};
use jis_site_core::events::SiteEvent;
use jis_site_core::mutation::merge_shallow;

use crate::error::{ApiError, ApiResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AdminClaims;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/theme/{part}", get(get_slot).put(update_slot))
}

fn theme_owner(part: &str) -> ApiResult<SlotOwner> {
    match SlotOwner::parse(part) {
        Some(owner) if owner.is_theme() => Ok(owner),
        _ => Err(ApiError::NotFound("Not Found".into())),
    }
}

fn slot_mut<'a>(doc: &'a mut SiteDocument, owner: &SlotOwner) -> &'a mut ThemeSlot {
    match owner {
        SlotOwner::Footer => &mut doc.footer,
        _ => &mut doc.header,
    }
}

async fn get_slot(
    State(state): State<AppState>,
    Path(part): Path<String>,
) -> ApiResult<Json<ThemeSlot>> {
    let owner = theme_owner(&part)?;
    let mut document = state.store().load().await?;
    Ok(Json(std::mem::take(slot_mut(&mut document, &owner))))
}

async fn update_slot(
    State(state): State<AppState>,
    _admin: AdminClaims,
    Path(part): Path<String>,
    JsonBody(patch): JsonBody<Value>,
) -> ApiResult<Json<ThemeSlot>> {
    let owner = theme_owner(&part)?;
    let updated = state
        .store()
        .update(|doc| {
            let slot = slot_mut(doc, &owner);
            let merged: ThemeSlot = merge_shallow(&*slot, patch, &[])?;
            validate_blocks(&merged.content)?;
            *slot = merged.clone();
            Ok::<_, ApiError>(merged)
        })
        .await?;

    tracing::info!(slot = %owner, blocks = updated.content.len(), "theme slot updated");
    state
        .event_bus()
        .notify(SiteEvent::slot_saved(owner, updated.content.len()));
    Ok(Json(updated))
}
