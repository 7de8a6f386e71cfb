use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use crate::{
    auth::AuthUser,
    error::ApiError,
    models::NewJournal,
    response::{record_json, records_json, ApiResponse},
    services::journal_service,
    AppState,
};

// POST /journals/:user_id/new-journal/
pub async fn post_new_journal(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    caller: AuthUser,
    Json(req): Json<NewJournal>,
) -> Result<Response, ApiError> {
    let journal = journal_service::create_journal(&state, &caller, &user_id, req).await?;

    Ok(ApiResponse::ok("Journal added successfully", record_json(&journal)).with_status(StatusCode::CREATED))
}

// GET /journals/:user_id/all-journals
pub async fn get_all_journals(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    caller: AuthUser,
) -> Result<ApiResponse, ApiError> {
    let journals = journal_service::list_journals(&state, &caller, &user_id).await?;

    Ok(ApiResponse::ok("All journals retrieved successfully", records_json(&journals)))
}

// GET /journals/:user_id/:journal_id
pub async fn get_journal(
    State(state): State<AppState>,
    Path((user_id, journal_id)): Path<(String, String)>,
    caller: AuthUser,
) -> Result<ApiResponse, ApiError> {
    let journal = journal_service::get_journal(&state, &caller, &user_id, &journal_id).await?;

    Ok(ApiResponse::ok("Journal retrieved successfully", record_json(&journal)))
}

// PUT /journals/:user_id/:journal_id
pub async fn put_journal(
    State(state): State<AppState>,
    Path((user_id, journal_id)): Path<(String, String)>,
    caller: AuthUser,
    Json(req): Json<NewJournal>,
) -> Result<ApiResponse, ApiError> {
    let journal = journal_service::update_journal(&state, &caller, &user_id, &journal_id, req).await?;

    Ok(ApiResponse::ok("Journal updated successfully", record_json(&journal)))
}

// DELETE /journals/:user_id/:journal_id
pub async fn delete_journal(
    State(state): State<AppState>,
    Path((user_id, journal_id)): Path<(String, String)>,
    caller: AuthUser,
) -> Result<ApiResponse, ApiError> {
    journal_service::delete_journal(&state, &caller, &user_id, &journal_id).await?;

    Ok(ApiResponse::empty("Journal deleted successfully"))
}
