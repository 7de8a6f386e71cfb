use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use crate::{
    auth::AuthUser,
    error::ApiError,
    models::{NewHolding, UpdateHolding},
    response::{record_json, records_json, ApiResponse},
    services::holding_service,
    AppState,
};

// POST /holdings/:user_id/new-holding/
pub async fn post_new_holding(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    caller: AuthUser,
    Json(req): Json<NewHolding>,
) -> Result<Response, ApiError> {
    let holding = holding_service::create_holding(&state, &caller, &user_id, req).await?;

    Ok(ApiResponse::ok("Holding added successfully", record_json(&holding)).with_status(StatusCode::CREATED))
}

// GET /holdings/:user_id/all-holdings
pub async fn get_all_holdings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    caller: AuthUser,
) -> Result<ApiResponse, ApiError> {
    let holdings = holding_service::list_holdings(&state, &caller, &user_id).await?;

    Ok(ApiResponse::ok("Holdings retrieved successfully", records_json(&holdings)))
}

// GET /holdings/:user_id/:holding_id
pub async fn get_holding(
    State(state): State<AppState>,
    Path((user_id, holding_id)): Path<(String, String)>,
    caller: AuthUser,
) -> Result<ApiResponse, ApiError> {
    let holding = holding_service::get_holding(&state, &caller, &user_id, &holding_id).await?;

    Ok(ApiResponse::ok("Holding retrieved successfully", record_json(&holding)))
}

// PUT /holdings/:user_id/:holding_id
pub async fn put_holding(
    State(state): State<AppState>,
    Path((user_id, holding_id)): Path<(String, String)>,
    caller: AuthUser,
    Json(patch): Json<UpdateHolding>,
) -> Result<ApiResponse, ApiError> {
    let holding = holding_service::update_holding(&state, &caller, &user_id, &holding_id, patch).await?;

    Ok(ApiResponse::ok("Holding updated successfully", record_json(&holding)))
}

// DELETE /holdings/:user_id/:holding_id
pub async fn delete_holding(
    State(state): State<AppState>,
    Path((user_id, holding_id)): Path<(String, String)>,
    caller: AuthUser,
) -> Result<ApiResponse, ApiError> {
    holding_service::delete_holding(&state, &caller, &user_id, &holding_id).await?;

    Ok(ApiResponse::empty("Holding deleted successfully"))
}
