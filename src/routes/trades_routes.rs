use axum::{Router, routing::{get, post}};

use crate::{AppState, controllers::trades_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/trades/:user_id/new-trade/", post(trades_controller::post_new_trade))
        .route("/trades/:user_id/all-trades", get(trades_controller::get_all_trades))
        .route(
            "/trades/:user_id/:trade_id",
            get(trades_controller::get_trade)
                .put(trades_controller::put_trade)
                .delete(trades_controller::delete_trade),
        )
}
