use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payment", get(payment::list_payments).post(payment::create_payment))
        .route("/payment/{id}", get(payment::get_payment))
        .route("/payment/{id}/edit", put(payment::update_payment))
        .route("/payment/{id}/delete", delete(payment::delete_payment))
}
