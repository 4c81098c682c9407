use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::expense;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expense", get(expense::list_expenses).post(expense::create_expense))
        .route("/expense/{id}", get(expense::get_expense))
        .route("/expense/{id}/edit", put(expense::update_expense))
        .route("/expense/{id}/delete", delete(expense::delete_expense))
}
