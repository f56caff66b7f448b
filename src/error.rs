use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum PortagenError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    BadRequest(String),

    /// A request the extractors refused before the handler ran.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("PDF rendering error: {0}")]
    Pdf(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl PortagenError {
    pub fn status(&self) -> StatusCode {
        match self {
            PortagenError::NotFound(_) => StatusCode::NOT_FOUND,
            PortagenError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            PortagenError::Forbidden(_) => StatusCode::FORBIDDEN,
            PortagenError::BadRequest(_) | PortagenError::Validation(_) => StatusCode::BAD_REQUEST,
            PortagenError::Rejected { status, .. } => *status,
            PortagenError::Database(_)
            | PortagenError::Io(_)
            | PortagenError::Json(_)
            | PortagenError::Template(_)
            | PortagenError::Archive(_)
            | PortagenError::Pdf(_)
            | PortagenError::PasswordHash(_)
            | PortagenError::Token(_)
            | PortagenError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<handlebars::RenderError> for PortagenError {
    fn from(e: handlebars::RenderError) -> Self {
        PortagenError::Template(e.to_string())
    }
}

impl From<handlebars::TemplateError> for PortagenError {
    fn from(e: handlebars::TemplateError) -> Self {
        PortagenError::Template(e.to_string())
    }
}

impl IntoResponse for PortagenError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "Server Error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ApiErrorBody { message })).into_response()
    }
}

/// Body of every error response.
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub message: String,
}
