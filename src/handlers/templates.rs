use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::info;

use super::parse_id;
use crate::db::Template;
use crate::error::PortagenError;
use crate::middleware::{AdminUser, ValidatedJson};
use crate::router::PortagenState;
use crate::types::forms::{TemplateForm, TemplatePatch};

const NOT_FOUND: &str = "Template not found";

/// GET /api/templates
pub async fn list_templates(
    State(state): State<PortagenState>,
) -> Result<Json<Vec<Template>>, PortagenError> {
    Ok(Json(state.storage.list_templates().await?))
}

/// GET /api/templates/{id}
pub async fn get_template(
    State(state): State<PortagenState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Template>, PortagenError> {
    let id = parse_id(&raw_id, NOT_FOUND)?;
    let template = state
        .storage
        .find_template(id)
        .await?
        .ok_or(PortagenError::NotFound(NOT_FOUND))?;
    Ok(Json(template))
}

/// POST /api/templates
pub async fn create_template(
    State(state): State<PortagenState>,
    AdminUser(admin): AdminUser,
    ValidatedJson(form): ValidatedJson<TemplateForm>,
) -> Result<(StatusCode, Json<Template>), PortagenError> {
    state.renderer.check(&form.files.html)?;
    let template = state.storage.insert_template(form).await?;
    info!(admin_id = %admin.id, template_id = %template.id, "template created");
    Ok((StatusCode::CREATED, Json(template)))
}

/// PUT /api/templates/{id}
pub async fn update_template(
    State(state): State<PortagenState>,
    AdminUser(admin): AdminUser,
    Path(raw_id): Path<String>,
    ValidatedJson(patch): ValidatedJson<TemplatePatch>,
) -> Result<Json<Template>, PortagenError> {
    let id = parse_id(&raw_id, NOT_FOUND)?;
    let mut template = state
        .storage
        .find_template(id)
        .await?
        .ok_or(PortagenError::NotFound(NOT_FOUND))?;

    if let Some(name) = patch.name {
        template.name = name;
    }
    if let Some(description) = patch.description {
        template.description = description;
    }
    if let Some(preview_url) = patch.preview_url {
        template.preview_url = preview_url;
    }
    if let Some(is_premium) = patch.is_premium {
        template.is_premium = is_premium;
    }
    if let Some(files) = patch.files {
        state.renderer.check(&files.html)?;
        template.files = files;
    }

    state.storage.update_template(&template).await?;
    info!(admin_id = %admin.id, template_id = %template.id, "template updated");
    Ok(Json(template))
}

/// DELETE /api/templates/{id}
pub async fn delete_template(
    State(state): State<PortagenState>,
    AdminUser(admin): AdminUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, PortagenError> {
    let id = parse_id(&raw_id, NOT_FOUND)?;
    if !state.storage.delete_template(id).await? {
        return Err(PortagenError::NotFound(NOT_FOUND));
    }
    info!(admin_id = %admin.id, template_id = %id, "template deleted");
    Ok(Json(json!({ "message": "Template removed" })))
}
