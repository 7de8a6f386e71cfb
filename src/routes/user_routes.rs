use axum::{Router, routing::post};
use crate::{AppState, controllers::user_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/users/register/", post(user_controller::post_register))
        .route("/users/login/", post(user_controller::post_login))
        .route("/users/reset/", post(user_controller::post_reset))
}
