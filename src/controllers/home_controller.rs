use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{error::ApiError, response::MessageResponse, AppState};

pub async fn home() -> impl IntoResponse {
    MessageResponse::new("Welcome to TradingJournalPro !")
}

pub async fn health() -> impl IntoResponse {
    MessageResponse::new("Health Ok !")
}

pub async fn health_db(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.ping().await {
        Ok(_) => (StatusCode::OK, MessageResponse::new("mongo: ok")).into_response(),
        Err(e) => ApiError::internal(format!("mongo error: {e}")).into_response(),
    }
}

pub async fn not_found() -> impl IntoResponse {
    ApiError::not_found("Not Found")
}
