use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::{
    error::ApiError,
    models::User,
    services::store::{Filter, Update},
    AppState,
};

#[derive(Debug, Deserialize)]
struct VerifiedClaims {
    #[serde(default)]
    sub: Option<String>,
}

pub fn is_valid_email(email: &str) -> bool {
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email regex");
    re.is_match(email)
}

fn require_email(email: &str) -> Result<(), ApiError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ApiError::unprocessable("Invalid email."))
    }
}

/// Signs `claims` plus an `exp` of now + `expires_in`
/// (configured `ACCESS_TOKEN_EXPIRE_DAYS` when `None`).
pub fn create_access_token(
    state: &AppState,
    claims: Map<String, Value>,
    expires_in: Option<Duration>,
) -> Result<String, ApiError> {
    let ttl = expires_in.unwrap_or_else(|| Duration::days(state.settings.access_token_expire_days));
    let exp = (Utc::now() + ttl).timestamp();

    let mut to_encode = claims;
    to_encode.insert("exp".into(), json!(exp));

    encode(
        &Header::new(state.settings.jwt_algorithm),
        &to_encode,
        &EncodingKey::from_secret(state.settings.jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::internal(format!("Auth error: {e}")))
}

/// Returns the token subject.
pub fn verify_token(state: &AppState, token: &str) -> Result<String, ApiError> {
    let validation = Validation::new(state.settings.jwt_algorithm);

    let data = decode::<VerifiedClaims>(
        token,
        &DecodingKey::from_secret(state.settings.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    data.claims
        .sub
        .ok_or_else(|| ApiError::unauthorized("Invalid token payload"))
}

pub async fn register_user(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, ApiError> {
    require_email(email)?;

    // unique email
    if state.db.users.find_one(&Filter::Email(email.to_string())).await?.is_some() {
        return Err(ApiError::bad_request("Email already registered"));
    }

    let pw_hash = hash(password, state.settings.bcrypt_cost)
        .map_err(|_| ApiError::internal("Failed to register user"))?;

    let user = User::new(name, email, pw_hash);
    state.db.users.insert_one(&user).await?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok(user)
}

pub struct LoginOutcome {
    pub user: User,
    pub access_token: String,
}

pub async fn login_user(state: &AppState, email: &str, password: &str) -> Result<LoginOutcome, ApiError> {
    let Some(user) = state.db.users.find_one(&Filter::Email(email.to_string())).await? else {
        return Err(ApiError::not_found("User does not exist"));
    };

    if !verify(password, &user.password_hash).unwrap_or(false) {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let mut claims = Map::new();
    claims.insert("sub".into(), json!(email));
    claims.insert("email".into(), json!(email));
    let access_token = create_access_token(state, claims, None)?;

    Ok(LoginOutcome { user, access_token })
}

pub async fn reset_password(state: &AppState, email: &str, password: &str) -> Result<(), ApiError> {
    require_email(email)?;

    let filter = Filter::Email(email.to_string());
    if state.db.users.find_one(&filter).await?.is_none() {
        return Err(ApiError::not_found("User does not exist"));
    }

    let pw_hash = hash(password, state.settings.bcrypt_cost)
        .map_err(|_| ApiError::internal("Failed to reset password"))?;

    let modified = state
        .db
        .users
        .update_one(&filter, &Update::set(mongodb::bson::doc! { "password_hash": pw_hash }))
        .await?;

    if modified != 1 {
        return Err(ApiError::internal("Failed to reset password"));
    }
    Ok(())
}
