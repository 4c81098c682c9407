use axum::extract::{Query, State};
use axum::Json;
use chrono::{Datelike, Utc};
use tracing::instrument;

use super::expense::load_expenses;
use super::online_order::load_orders;
use super::payment::load_payments;
use super::sale::load_sales;
use crate::dtos::common::ListQuery;
use crate::dtos::report::{CollectionTotal, DealerSalesQuery, DealerSalesResponse, TotalsResponse};
use crate::error::AppError;
use crate::reports::{grand_total, monthly_trend, party_breakdown, MonthlyTotal};
use crate::search::{filter_records, DateRange, Searchable};
use crate::state::AppState;

// GET /backend/dashboard/monthly-orders
#[instrument(skip(state))]
pub async fn monthly_orders(State(state): State<AppState>) -> Result<Json<Vec<MonthlyTotal>>, AppError> {
    let orders = load_orders(&state).await?;
    Ok(Json(monthly_trend(&orders)))
}

// GET /backend/dashboard/dealer-sales?month=MM&year=YYYY
#[instrument(skip(state))]
pub async fn dealer_sales(
    State(state): State<AppState>,
    Query(query): Query<DealerSalesQuery>,
) -> Result<Json<DealerSalesResponse>, AppError> {
    let today = Utc::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());
    if !(1..=12).contains(&month) {
        return Err(AppError::validation("month must be between 1 and 12"));
    }

    let sales = load_sales(&state).await?;
    let dealers = party_breakdown(&sales, year, month);
    let total = dealers.iter().map(|share| share.total).sum();

    Ok(Json(DealerSalesResponse {
        year,
        month,
        total,
        dealers,
    }))
}

// GET /backend/dashboard/totals
#[instrument(skip(state))]
pub async fn totals(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<TotalsResponse>, AppError> {
    let range = query.date_range()?;
    let search = query.search();

    Ok(Json(TotalsResponse {
        sales: collection_total(load_sales(&state).await?, search, range),
        online_orders: collection_total(load_orders(&state).await?, search, range),
        payments: collection_total(load_payments(&state).await?, search, range),
        expenses: collection_total(load_expenses(&state).await?, search, range),
    }))
}

fn collection_total<T: Searchable>(records: Vec<T>, search: &str, range: Option<DateRange>) -> CollectionTotal {
    let matching = filter_records(records, search, range);
    CollectionTotal {
        count: matching.len(),
        total: grand_total(&matching),
    }
}
