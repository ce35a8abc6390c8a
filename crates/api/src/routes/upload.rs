use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use tower_http::services::ServeDir;

use jis_site_core::mutation::UploadResponse;
use jis_site_core::upload::{PendingFile, UploadError, Uploader};

use crate::error::ApiResult;
use crate::state::AppState;
use crate::storage::uploads::UPLOADS_ROUTE;

/// Upload routes plus static serving of the stored files.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/upload", post(upload_file))
        .nest_service(UPLOADS_ROUTE, ServeDir::new(state.uploads().dir()))
}

/// Store the multipart field `file`.
async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut pending = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        pending = Some(PendingFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let file = pending.ok_or(UploadError::NoFile)?;
    let url = state.uploads().upload(&file).await?;
    Ok(Json(UploadResponse { url }))
}
