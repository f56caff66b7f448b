use axum::{
    Json,
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::parse_id;
use crate::db::models::{PortfolioDetail, PortfolioListItem};
use crate::db::{Portfolio, User};
use crate::error::PortagenError;
use crate::middleware::{AuthUser, JsonBody, ValidatedJson};
use crate::router::PortagenState;
use crate::service::access::{self, PortfolioAction};
use crate::service::export;
use crate::types::forms::{PortfolioForm, PortfolioPatch};

const NOT_FOUND: &str = "Portfolio not found";

/// GET /api/portfolios
pub async fn list_portfolios(
    State(state): State<PortagenState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<PortfolioListItem>>, PortagenError> {
    Ok(Json(state.storage.list_portfolios_for_user(user.id).await?))
}

/// POST /api/portfolios
pub async fn create_portfolio(
    State(state): State<PortagenState>,
    AuthUser(user): AuthUser,
    ValidatedJson(form): ValidatedJson<PortfolioForm>,
) -> Result<(StatusCode, Json<Portfolio>), PortagenError> {
    usable_template(&state, &user, form.template_id).await?;
    let portfolio = state
        .storage
        .insert_portfolio(user.id, form.template_id, form.content)
        .await?;
    info!(user_id = %user.id, portfolio_id = %portfolio.id, "portfolio created");
    Ok((StatusCode::CREATED, Json(portfolio)))
}

/// GET /api/portfolios/{id}
pub async fn get_portfolio(
    State(state): State<PortagenState>,
    AuthUser(user): AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<PortfolioDetail>, PortagenError> {
    let portfolio = load(&state, &raw_id).await?;
    access::authorize(&portfolio, &user, PortfolioAction::View)?;

    let template = match portfolio.template_id {
        Some(template_id) => state.storage.find_template(template_id).await?,
        None => None,
    };
    let owner = state
        .storage
        .find_owner(portfolio.user_id)
        .await?
        .ok_or(PortagenError::NotFound(NOT_FOUND))?;

    Ok(Json(PortfolioDetail {
        portfolio,
        template,
        owner,
    }))
}

/// PUT /api/portfolios/{id}
pub async fn update_portfolio(
    State(state): State<PortagenState>,
    AuthUser(user): AuthUser,
    Path(raw_id): Path<String>,
    JsonBody(patch): JsonBody<PortfolioPatch>,
) -> Result<Json<Portfolio>, PortagenError> {
    let mut portfolio = load(&state, &raw_id).await?;
    access::authorize(&portfolio, &user, PortfolioAction::Update)?;

    if let Some(template_id) = patch.template_id
        && portfolio.template_id != Some(template_id)
    {
        usable_template(&state, &user, template_id).await?;
        portfolio.template_id = Some(template_id);
    }
    portfolio.content.apply(patch.content);
    portfolio.content.validate()?;

    state.storage.update_portfolio(&mut portfolio).await?;
    info!(user_id = %user.id, portfolio_id = %portfolio.id, "portfolio updated");
    Ok(Json(portfolio))
}

/// DELETE /api/portfolios/{id}
pub async fn delete_portfolio(
    State(state): State<PortagenState>,
    AuthUser(user): AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, PortagenError> {
    let portfolio = load(&state, &raw_id).await?;
    access::authorize(&portfolio, &user, PortfolioAction::Delete)?;

    state.storage.delete_portfolio(portfolio.id).await?;
    info!(user_id = %user.id, portfolio_id = %portfolio.id, "portfolio deleted");
    Ok(Json(json!({ "message": "Portfolio deleted successfully" })))
}

/// GET /api/portfolios/{id}/download/zip
pub async fn download_zip(
    State(state): State<PortagenState>,
    AuthUser(user): AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Response, PortagenError> {
    let id = parse_id(&raw_id, NOT_FOUND)?;
    let download = export::export_zip(&state, &user, id).await?;
    let headers = attachment_headers("application/zip", &download.filename, download.len);
    Ok((headers, download.body).into_response())
}

/// GET /api/portfolios/{id}/download/pdf
pub async fn download_pdf(
    State(state): State<PortagenState>,
    AuthUser(user): AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Response, PortagenError> {
    let id = parse_id(&raw_id, NOT_FOUND)?;
    let download = export::export_pdf(&state, &user, id).await?;
    let headers = attachment_headers(
        "application/pdf",
        &download.filename,
        download.bytes.len() as u64,
    );
    Ok((headers, Body::from(download.bytes)).into_response())
}

async fn load(state: &PortagenState, raw_id: &str) -> Result<Portfolio, PortagenError> {
    let id = parse_id(raw_id, NOT_FOUND)?;
    state
        .storage
        .find_portfolio(id)
        .await?
        .ok_or(PortagenError::NotFound(NOT_FOUND))
}

/// The template must exist and be available to `user`.
async fn usable_template(
    state: &PortagenState,
    user: &User,
    template_id: Uuid,
) -> Result<(), PortagenError> {
    let template = state
        .storage
        .find_template(template_id)
        .await?
        .ok_or_else(|| PortagenError::BadRequest("Template not found".to_string()))?;
    access::ensure_template_usable(&template, user)
}

fn attachment_headers(content_type: &'static str, filename: &str, len: u64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    headers
}
