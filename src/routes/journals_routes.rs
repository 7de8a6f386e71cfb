use axum::{Router, routing::{get, post}};

use crate::{AppState, controllers::journals_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/journals/:user_id/new-journal/", post(journals_controller::post_new_journal))
        .route("/journals/:user_id/all-journals", get(journals_controller::get_all_journals))
        .route(
            "/journals/:user_id/:journal_id",
            get(journals_controller::get_journal)
                .put(journals_controller::put_journal)
                .delete(journals_controller::delete_journal),
        )
}
