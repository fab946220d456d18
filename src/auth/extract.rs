use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;

use super::token::SessionKeys;

/// Caller of a protected route, identified by the `uuid` in its session token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

/// Token part of `Authorization: Bearer <token>`; the scheme is case-insensitive.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token =
            bearer_token(parts).ok_or_else(|| ApiError::unauthorized("Missing access token!"))?;
        SessionKeys::from_ref(state)
            .user_uuid(token)
            .map(AuthUser)
            .map_err(|e| {
                warn!(error = %e, "session token rejected");
                ApiError::unauthorized("Invalid or expired token")
            })
    }
}
