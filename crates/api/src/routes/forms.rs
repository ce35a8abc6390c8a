use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use jis_site_core::document::validate::validate_form_name;
use jis_site_core::document::Form;
use jis_site_core::events::SiteEvent;
use jis_site_core::mutation::{merge_shallow, NewForm};

use crate::error::{ApiError, ApiResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AdminClaims;
use crate::state::AppState;

/// Submissions are append-only; a PUT can never replace them.
const PROTECTED_FORM_KEYS: &[&str] = &["submissions"];

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/forms", get(list_forms).post(create_form))
        .route("/api/forms/{name}", get(get_form).put(update_form))
        .route(
            "/api/forms/{name}/submissions",
            post(submit_form).get(list_submissions),
        )
}

fn form_not_found() -> ApiError {
    ApiError::NotFound("Form not found".into())
}

fn name_taken(name: &str) -> ApiError {
    ApiError::Conflict(format!("Form {name:?} already exists"))
}

async fn list_forms(State(state): State<AppState>) -> ApiResult<Json<Vec<Form>>> {
    let document = state.store().load().await?;
    Ok(Json(document.forms))
}

async fn create_form(
    State(state): State<AppState>,
    _admin: AdminClaims,
    JsonBody(new_form): JsonBody<NewForm>,
) -> ApiResult<(StatusCode, Json<Form>)> {
    validate_form_name(&new_form.name)?;

    let form = Form {
        name: new_form.name,
        steps: new_form.steps,
        submissions: Vec::new(),
        extra: Default::default(),
    };

    let created = state
        .store()
        .update(|doc| {
            if doc.form(&form.name).is_some() {
                return Err(name_taken(&form.name));
            }
            doc.forms.push(form.clone());
            Ok(form)
        })
        .await?;

    tracing::info!(form = %created.name, "form created");
    state.event_bus().notify(SiteEvent::FormSaved {
        name: created.name.clone(),
    });
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_form(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Form>> {
    let mut document = state.store().load().await?;
    let index = document.form_index(&name).ok_or_else(form_not_found)?;
    Ok(Json(document.forms.swap_remove(index)))
}

async fn update_form(
    State(state): State<AppState>,
    _admin: AdminClaims,
    Path(name): Path<String>,
    JsonBody(patch): JsonBody<Value>,
) -> ApiResult<Json<Form>> {
    let updated = state
        .store()
        .update(|doc| {
            let index = doc.form_index(&name).ok_or_else(form_not_found)?;
            let merged: Form = merge_shallow(&doc.forms[index], patch, PROTECTED_FORM_KEYS)?;
            validate_form_name(&merged.name)?;
            if merged.name != name && doc.form(&merged.name).is_some() {
                return Err(name_taken(&merged.name));
            }
            doc.forms[index] = merged.clone();
            Ok::<_, ApiError>(merged)
        })
        .await?;

    tracing::info!(form = %name, steps = updated.steps.len(), "form updated");
    state.event_bus().notify(SiteEvent::FormSaved {
        name: updated.name.clone(),
    });
    Ok(Json(updated))
}

/// Public endpoint. The body is stored verbatim and echoed back.
async fn submit_form(
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonBody(submission): JsonBody<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    if !submission.is_object() {
        return Err(ApiError::BadRequest(
            "Submission must be a JSON object".into(),
        ));
    }

    let stored = state
        .store()
        .update(|doc| {
            let index = doc.form_index(&name).ok_or_else(form_not_found)?;
            doc.forms[index].submissions.push(submission.clone());
            Ok::<_, ApiError>(submission)
        })
        .await?;

    tracing::info!(form = %name, "form submission received");
    state.event_bus().notify(SiteEvent::FormSubmitted { name });
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn list_submissions(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Vec<Value>>> {
    let mut document = state.store().load().await?;
    let index = document.form_index(&name).ok_or_else(form_not_found)?;
    Ok(Json(std::mem::take(&mut document.forms[index].submissions)))
}
