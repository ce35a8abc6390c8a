//! Server-side rendering of public pages.

use axum::{
    extract::{Path, Query, State},
    response::Html,
    routing::get,
    Router,
};
use serde::Deserialize;

use jis_site_core::slot::{render_page, Locale, PageView};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/render/{slug}", get(render))
}

#[derive(Debug, Default, Deserialize)]
struct RenderQuery {
    #[serde(default)]
    lang: Locale,
}

async fn render(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<RenderQuery>,
) -> ApiResult<Html<String>> {
    let document = state.store().load().await?;
    let page = document
        .page(&slug)
        .ok_or_else(|| ApiError::NotFound("Page not found".into()))?;

    let view = PageView {
        settings: &document.site_settings,
        header: &document.header.content,
        page,
        footer: &document.footer.content,
        popups: &document.popups,
        locale: query.lang,
    };
    tracing::debug!(%slug, locale = query.lang.code(), "rendering page");
    Ok(Html(render_page(&view, &document)))
}
