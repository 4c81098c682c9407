use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::sale;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(sale::list_sales).post(sale::create_sale))
        .route("/sales/preview", post(sale::preview_sale))
        .route("/sales/{id}", get(sale::get_sale))
        .route("/sales/{id}/edit", put(sale::update_sale))
        .route("/sales/{id}/delete", delete(sale::delete_sale))
}
