use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::ApiError,
    models::{OtpRequest, SendOtpQuery, UseCase, VerifyOtpQuery},
    response::MessageResponse,
    services::{
        auth_service,
        mail_service::{self, OutgoingMail},
    },
    templates, AppState,
};

// POST /email/send-otp/?name=
pub async fn post_send_otp(
    State(state): State<AppState>,
    Query(q): Query<SendOtpQuery>,
    Json(req): Json<OtpRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = req.email.trim().to_string();
    if !auth_service::is_valid_email(&email) {
        return Err(ApiError::unprocessable("Invalid email."));
    }

    // checked before issuing so a rejected request keeps any pending code
    let use_case = UseCase::parse(&req.use_case).ok_or_else(|| ApiError::bad_request("Invalid use case"))?;

    let otp = state.otp.issue(&email);

    let html_body = templates::render_otp(&state.hbs, use_case, &q.name, &otp)
        .map_err(|e| ApiError::internal(format!("Failed to send email: {e}")))?;

    mail_service::dispatch(
        state.mailer.clone(),
        OutgoingMail {
            to: email,
            subject: req.subject,
            html_body,
        },
    );

    Ok(MessageResponse::new("Email has been sent successfully"))
}

// POST /email/verify-otp/?email=&otp=
pub async fn post_verify_otp(
    State(state): State<AppState>,
    Query(q): Query<VerifyOtpQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.otp.verify(&q.email, &q.otp)?;
    Ok(MessageResponse::new("OTP verified successfully"))
}
