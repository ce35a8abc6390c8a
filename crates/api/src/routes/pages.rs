use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use jis_site_core::document::validate::{validate_blocks, validate_slug, validate_title};
use jis_site_core::document::{Page, SlotOwner};
use jis_site_core::events::SiteEvent;
use jis_site_core::mutation::{merge_shallow, NewPage};

use crate::error::{ApiError, ApiResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AdminClaims;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/pages", get(list_pages).post(create_page))
        .route(
            "/api/pages/{slug}",
            get(get_page).put(update_page).delete(delete_page),
        )
}

fn page_not_found() -> ApiError {
    ApiError::NotFound("Page not found".into())
}

fn slug_taken(slug: &str) -> ApiError {
    ApiError::Conflict(format!("Page with slug {slug:?} already exists"))
}

async fn list_pages(State(state): State<AppState>) -> ApiResult<Json<Vec<Page>>> {
    let document = state.store().load().await?;
    Ok(Json(document.pages))
}

async fn create_page(
    State(state): State<AppState>,
    _admin: AdminClaims,
    JsonBody(new_page): JsonBody<NewPage>,
) -> ApiResult<(StatusCode, Json<Page>)> {
    validate_slug(&new_page.slug)?;
    validate_title(&new_page.title)?;
    validate_blocks(&new_page.content)?;

    let page = Page {
        slug: new_page.slug,
        title: new_page.title,
        content: new_page.content,
        extra: Default::default(),
    };

    let created = state
        .store()
        .update(|doc| {
            if doc.page(&page.slug).is_some() {
                return Err(slug_taken(&page.slug));
            }
            doc.pages.push(page.clone());
            Ok(page)
        })
        .await?;

    tracing::info!(slug = %created.slug, "page created");
    state.event_bus().notify(SiteEvent::PageCreated {
        slug: created.slug.clone(),
    });
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Page>> {
    let mut document = state.store().load().await?;
    let index = document.page_index(&slug).ok_or_else(page_not_found)?;
    Ok(Json(document.pages.swap_remove(index)))
}

/// Shallow-merge the body over the stored page. `content` is replaced whole.
async fn update_page(
    State(state): State<AppState>,
    _admin: AdminClaims,
    Path(slug): Path<String>,
    JsonBody(patch): JsonBody<Value>,
) -> ApiResult<Json<Page>> {
    let updated = state
        .store()
        .update(|doc| {
            let index = doc.page_index(&slug).ok_or_else(page_not_found)?;
            let merged: Page = merge_shallow(&doc.pages[index], patch, &[])?;
            validate_slug(&merged.slug)?;
            validate_title(&merged.title)?;
            validate_blocks(&merged.content)?;
            if merged.slug != slug && doc.page(&merged.slug).is_some() {
                return Err(slug_taken(&merged.slug));
            }
            doc.pages[index] = merged.clone();
            Ok::<_, ApiError>(merged)
        })
        .await?;

    tracing::info!(%slug, blocks = updated.content.len(), "page updated");
    state.event_bus().notify(SiteEvent::slot_saved(
        SlotOwner::Page(updated.slug.clone()),
        updated.content.len(),
    ));
    Ok(Json(updated))
}

async fn delete_page(
    State(state): State<AppState>,
    _admin: AdminClaims,
    Path(slug): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .store()
        .update(|doc| {
            let index = doc.page_index(&slug).ok_or_else(page_not_found)?;
            doc.pages.remove(index);
            Ok::<_, ApiError>(())
        })
        .await?;

    tracing::info!(%slug, "page deleted");
    state.event_bus().notify(SiteEvent::PageDeleted { slug });
    Ok(StatusCode::NO_CONTENT)
}
