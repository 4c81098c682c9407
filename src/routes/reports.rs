use axum::{routing::get, Router};
use crate::handlers::report;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/monthly-orders", get(report::monthly_orders))
        .route("/dashboard/dealer-sales", get(report::dealer_sales))
        .route("/dashboard/totals", get(report::totals))
}
