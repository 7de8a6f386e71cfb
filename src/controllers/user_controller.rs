use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{
    error::ApiError,
    models::{LoginUser, NewUser, ResetPassword},
    response::{record_json, LoginResponse, UserResponse},
    services::auth_service,
    AppState,
};

// POST /users/register/
pub async fn post_register(
    State(state): State<AppState>,
    Json(form): Json<NewUser>,
) -> Result<Response, ApiError> {
    let email = form.email.trim().to_string();

    let user = auth_service::register_user(&state, &form.name, &email, &form.password).await?;

    // the stored digest is echoed back along with the rest of the document
    let body = UserResponse {
        success: true,
        message: "User registered successfully".to_string(),
        user: record_json(&user),
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

// POST /users/login/
pub async fn post_login(
    State(state): State<AppState>,
    Json(form): Json<LoginUser>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = form.email.trim().to_string();

    let out = auth_service::login_user(&state, &email, &form.password).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: format!("Welcome back, {}!", out.user.name),
        access_token: out.access_token,
    }))
}

// POST /users/reset/
pub async fn post_reset(
    State(state): State<AppState>,
    Json(form): Json<ResetPassword>,
) -> Result<impl IntoResponse, ApiError> {
    let email = form.email.trim().to_string();

    auth_service::reset_password(&state, &email, &form.password).await?;

    Ok(Json(UserResponse {
        success: true,
        message: "Password reset successfully".to_string(),
        user: json!({ "email": email }),
    }))
}
