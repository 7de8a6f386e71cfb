use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use crate::{
    auth::AuthUser,
    error::ApiError,
    models::NewTrade,
    response::{record_json, records_json, ApiResponse},
    services::trade_service::{self, TradeCreated},
    AppState,
};

// POST /trades/:user_id/new-trade/
pub async fn post_new_trade(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    caller: AuthUser,
    Json(req): Json<NewTrade>,
) -> Result<Response, ApiError> {
    let body = match trade_service::create_trade(&state, &caller, &user_id, req).await? {
        TradeCreated::DayTrade(journal) => {
            ApiResponse::ok("Day trade journal added successfully", record_json(&journal))
        }
        TradeCreated::Trade(trade) => ApiResponse::ok("Trade added successfully", record_json(&trade)),
    };

    Ok(body.with_status(StatusCode::CREATED))
}

// GET /trades/:user_id/all-trades
pub async fn get_all_trades(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    caller: AuthUser,
) -> Result<ApiResponse, ApiError> {
    let trades = trade_service::list_trades(&state, &caller, &user_id).await?;

    Ok(ApiResponse::ok("All trades retrieved successfully", records_json(&trades)))
}

// GET /trades/:user_id/:trade_id
pub async fn get_trade(
    State(state): State<AppState>,
    Path((user_id, trade_id)): Path<(String, String)>,
    caller: AuthUser,
) -> Result<ApiResponse, ApiError> {
    let trade = trade_service::get_trade(&state, &caller, &user_id, &trade_id).await?;

    Ok(ApiResponse::ok("Trade retrieved successfully", record_json(&trade)))
}

// PUT /trades/:user_id/:trade_id
pub async fn put_trade(
    State(state): State<AppState>,
    Path((user_id, trade_id)): Path<(String, String)>,
    caller: AuthUser,
    Json(req): Json<NewTrade>,
) -> Result<ApiResponse, ApiError> {
    let trade = trade_service::update_trade(&state, &caller, &user_id, &trade_id, req).await?;

    Ok(ApiResponse::ok("Trade updated successfully", record_json(&trade)))
}

// DELETE /trades/:user_id/:trade_id
pub async fn delete_trade(
    State(state): State<AppState>,
    Path((user_id, trade_id)): Path<(String, String)>,
    caller: AuthUser,
) -> Result<ApiResponse, ApiError> {
    trade_service::delete_trade(&state, &caller, &user_id, &trade_id).await?;

    Ok(ApiResponse::empty("Trade deleted successfully"))
}
