use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use jis_site_core::document::validate::validate_blocks;
use jis_site_core::document::{new_id, Popup, SlotOwner};
use jis_site_core::events::SiteEvent;
use jis_site_core::mutation::{merge_shallow, NewPopup};

use crate::error::{ApiError, ApiResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AdminClaims;
use crate::state::AppState;

/// Popup ids are assigned by the server and never change.
const PROTECTED_POPUP_KEYS: &[&str] = &["id"];

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/popups", get(list_popups).post(create_popup))
        .route(
            "/api/popups/{id}",
            get(get_popup).put(update_popup).delete(delete_popup),
        )
}

fn popup_not_found() -> ApiError {
    ApiError::NotFound("Popup not found".into())
}

async fn list_popups(State(state): State<AppState>) -> ApiResult<Json<Vec<Popup>>> {
    let document = state.store().load().await?;
    Ok(Json(document.popups))
}

async fn create_popup(
    State(state): State<AppState>,
    _admin: AdminClaims,
    JsonBody(new_popup): JsonBody<NewPopup>,
) -> ApiResult<(StatusCode, Json<Popup>)> {
    validate_blocks(&new_popup.content)?;

    let NewPopup {
        name,
        content,
        trigger,
        mut extra,
    } = new_popup;
    if extra.remove("id").is_some() {
        tracing::debug!("ignoring client-supplied popup id");
    }
    let popup = Popup {
        id: new_id(),
        name,
        content,
        trigger,
        extra,
    };

    let created = state
        .store()
        .update(|doc| {
            doc.popups.push(popup.clone());
            Ok::<_, ApiError>(popup)
        })
        .await?;

    tracing::info!(popup = %created.id, "popup created");
    state.event_bus().notify(SiteEvent::PopupCreated {
        id: created.id.clone(),
    });
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_popup(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Popup>> {
    let mut document = state.store().load().await?;
    let index = document.popup_index(&id).ok_or_else(popup_not_found)?;
    Ok(Json(document.popups.swap_remove(index)))
}

async fn update_popup(
    State(state): State<AppState>,
    _admin: AdminClaims,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<Value>,
) -> ApiResult<Json<Popup>> {
    let updated = state
        .store()
        .update(|doc| {
            let index = doc.popup_index(&id).ok_or_else(popup_not_found)?;
            let merged: Popup = merge_shallow(&doc.popups[index], patch, PROTECTED_POPUP_KEYS)?;
            validate_blocks(&merged.content)?;
            doc.popups[index] = merged.clone();
            Ok::<_, ApiError>(merged)
        })
        .await?;

    tracing::info!(popup = %id, blocks = updated.content.len(), "popup updated");
    state.event_bus().notify(SiteEvent::slot_saved(
        SlotOwner::Popup(id),
        updated.content.len(),
    ));
    Ok(Json(updated))
}

async fn delete_popup(
    State(state): State<AppState>,
    _admin: AdminClaims,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .store()
        .update(|doc| {
            let index = doc.popup_index(&id).ok_or_else(popup_not_found)?;
            doc.popups.remove(index);
            Ok::<_, ApiError>(())
        })
        .await?;

    tracing::info!(popup = %id, "popup deleted");
    state.event_bus().notify(SiteEvent::PopupDeleted { id });
    Ok(StatusCode::NO_CONTENT)
}
