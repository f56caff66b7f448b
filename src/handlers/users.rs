use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::info;

use crate::auth::password;
use crate::db::User;
use crate::error::PortagenError;
use crate::middleware::{AuthUser, ValidatedJson};
use crate::router::PortagenState;
use crate::types::forms::{LoginForm, ProfileUpdate, RegisterForm};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// A user together with a freshly signed bearer token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

/// POST /api/users/register
pub async fn register(
    State(state): State<PortagenState>,
    ValidatedJson(form): ValidatedJson<RegisterForm>,
) -> Result<(StatusCode, Json<AuthResponse>), PortagenError> {
    if state.storage.find_user_by_email(&form.email).await?.is_some() {
        return Err(PortagenError::BadRequest("User already exists".to_string()));
    }

    let is_admin = state.config.is_admin_email(form.email.trim());
    let hash = password::hash_blocking(form.password).await?;
    let user = state
        .storage
        .create_user(&form.name, &form.email, &hash, is_admin)
        .await?;
    let token = state.tokens.issue(user.id)?;

    info!(user_id = %user.id, is_admin, "user registered");
    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

/// POST /api/users/login
pub async fn login(
    State(state): State<PortagenState>,
    ValidatedJson(form): ValidatedJson<LoginForm>,
) -> Result<Json<AuthResponse>, PortagenError> {
    let user = state
        .storage
        .find_user_by_email(&form.email)
        .await?
        .ok_or(PortagenError::Unauthorized(INVALID_CREDENTIALS))?;

    if !password::verify_blocking(form.password, user.password_hash.clone()).await? {
        return Err(PortagenError::Unauthorized(INVALID_CREDENTIALS));
    }

    let token = state.tokens.issue(user.id)?;
    info!(user_id = %user.id, "user logged in");
    Ok(Json(AuthResponse { user, token }))
}

/// GET /api/users/profile
pub async fn profile(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

/// PUT /api/users/profile
pub async fn update_profile(
    State(state): State<PortagenState>,
    AuthUser(mut user): AuthUser,
    ValidatedJson(update): ValidatedJson<ProfileUpdate>,
) -> Result<Json<AuthResponse>, PortagenError> {
    if let Some(name) = update.name {
        user.name = name.trim().to_string();
    }
    if let Some(email) = update.email {
        user.email = email;
    }
    if let Some(new_password) = update.password {
        user.password_hash = password::hash_blocking(new_password).await?;
    }
    state.storage.update_user(&mut user).await?;

    let token = state.tokens.issue(user.id)?;
    info!(user_id = %user.id, "profile updated");
    Ok(Json(AuthResponse { user, token }))
}
