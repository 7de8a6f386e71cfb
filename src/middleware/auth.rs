use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::{error::ApiError, services::auth_service, AppState};

/// Caller identity taken from a verified bearer token.
///
/// Note: this only proves the caller holds a valid token. Whether the caller
/// may touch the `user_id` in the path is decided by the ownership resolver,
/// and by default it is not checked at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
}

/// Accepts `<token>` or `<scheme> <token>`; with a space present the second
/// space-separated piece is the token.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?;
    if raw.is_empty() {
        return None;
    }

    if raw.contains(' ') {
        Some(raw.split(' ').nth(1).unwrap_or("").to_string())
    } else {
        Some(raw.to_string())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Authorization token not provided"))?;

        let username = auth_service::verify_token(state, &token)?;

        Ok(AuthUser { username })
    }
}
