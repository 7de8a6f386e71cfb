use axum::{Router, routing::{get, post}};

use crate::{AppState, controllers::holdings_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/holdings/:user_id/new-holding/", post(holdings_controller::post_new_holding))
        .route("/holdings/:user_id/all-holdings", get(holdings_controller::get_all_holdings))
        .route(
            "/holdings/:user_id/:holding_id",
            get(holdings_controller::get_holding)
                .put(holdings_controller::put_holding)
                .delete(holdings_controller::delete_holding),
        )
}
