use axum::{Router, routing::post};
use crate::{AppState, controllers::email_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/email/send-otp/", post(email_controller::post_send_otp))
        .route("/email/verify-otp/", post(email_controller::post_verify_otp))
}
