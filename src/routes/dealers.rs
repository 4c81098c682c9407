use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::dealer;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dealers", get(dealer::list_dealers).post(dealer::create_dealer))
        .route("/dealers/{id}", get(dealer::get_dealer))
        .route("/dealers/{id}/sale-template", get(dealer::sale_template))
        .route("/dealers/{id}/edit", put(dealer::update_dealer))
        // Admin check happens in the handler
        .route("/dealers/{id}/delete", delete(dealer::delete_dealer))
}
