pub mod dealers;
pub mod expenses;
pub mod online_orders;
pub mod payments;
pub mod reports;
pub mod sales;
pub mod users;

use axum::{middleware, Router};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

/// Everything under `/backend` requires a bearer token.
pub fn create_router(state: &AppState) -> Router<AppState> {
    let backend = Router::new()
        .merge(dealers::routes())
        .merge(sales::routes())
        .merge(online_orders::routes())
        .merge(payments::routes())
        .merge(expenses::routes())
        .merge(reports::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(users::routes(state))
        .nest("/backend", backend)
}
