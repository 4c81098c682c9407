use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::online_order;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/online-order",
            get(online_order::list_orders).post(online_order::create_order),
        )
        .route("/online-order/{id}", get(online_order::get_order))
        .route("/online-order/{id}/edit", put(online_order::update_order))
        .route("/online-order/{id}/delete", delete(online_order::delete_order))
}
