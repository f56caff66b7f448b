use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use headers::Authorization;
use headers::authorization::Bearer;

use crate::db::User;
use crate::error::PortagenError;
use crate::router::PortagenState;
use crate::service::access;

/// The account behind a valid `Authorization: Bearer <jwt>` header.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<PortagenState> for AuthUser {
    type Rejection = PortagenError;

    #[tracing::instrument(skip_all, name = "middleware.auth")]
    async fn from_request_parts(
        parts: &mut Parts,
        state: &PortagenState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| PortagenError::Unauthorized("Not authorized, no token"))?;

        let claims = state.tokens.verify(bearer.token())?;
        let user = state
            .storage
            .find_user(claims.sub)
            .await?
            .ok_or(PortagenError::Unauthorized("Not authorized, user not found"))?;

        Ok(Self(user))
    }
}

/// An authenticated account with `isAdmin` set.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequestParts<PortagenState> for AdminUser {
    type Rejection = PortagenError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &PortagenState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        access::ensure_admin(&user)?;
        Ok(Self(user))
    }
}
