use axum::Router;
use tower_http::trace::TraceLayer;

use crate::{controllers::home_controller, AppState};

pub mod home_routes;
pub mod user_routes;
pub mod holdings_routes;
pub mod trades_routes;
pub mod journals_routes;
pub mod email_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = user_routes::add_routes(router);
    let router = holdings_routes::add_routes(router);
    let router = trades_routes::add_routes(router);
    let router = journals_routes::add_routes(router);
    let router = email_routes::add_routes(router);

    router
        .fallback(home_controller::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
