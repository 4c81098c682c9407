use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, instrument};

use super::dealer::{dealer_directory, dealer_ref, ensure_dealer_exists};
use crate::billing::Worksheet;
use crate::dtos::common::ListQuery;
use crate::dtos::dealer::WorksheetResponse;
use crate::dtos::sale::{PreviewRequest, SaleRequest, SaleResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::search::filter_records;
use crate::state::AppState;

/// Every sale joined with its dealer's name.
pub(crate) async fn load_sales(state: &AppState) -> Result<Vec<SaleResponse>, AppError> {
    let directory = dealer_directory(state).await?;
    Ok(state
        .sales
        .list()
        .await?
        .into_iter()
        .map(|record| {
            let dealer = dealer_ref(&directory, record.data.dealer_id);
            SaleResponse::new(record, dealer)
        })
        .collect())
}

// GET /backend/sales
#[instrument(skip(state))]
pub async fn list_sales(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<SaleResponse>>, AppError> {
    let range = query.date_range()?;
    let sales = load_sales(&state).await?;
    Ok(Json(filter_records(sales, query.search(), range)))
}

// GET /backend/sales/{id}
#[instrument(skip(state))]
pub async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SaleResponse>, AppError> {
    let record = state
        .sales
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Sale not found"))?;

    let directory = dealer_directory(&state).await?;
    let dealer = dealer_ref(&directory, record.data.dealer_id);
    Ok(Json(SaleResponse::new(record, dealer)))
}

// POST /backend/sales
#[instrument(skip(state, payload))]
pub async fn create_sale(
    State(state): State<AppState>,
    Json(payload): Json<SaleRequest>,
) -> Result<(StatusCode, Json<SaleResponse>), AppError> {
    let sale = payload.into_sale()?;
    let dealer = ensure_dealer_exists(&state, sale.dealer_id).await?;

    let record = state.sales.insert(sale).await?;
    info!(id = record.id, dealer_id = dealer.id, "Sale recorded");

    Ok((StatusCode::CREATED, Json(SaleResponse::new(record, dealer))))
}

// PUT /backend/sales/{id}/edit
#[instrument(skip(state, payload))]
pub async fn update_sale(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<SaleRequest>,
) -> Result<Json<SaleResponse>, AppError> {
    let sale = payload.into_sale()?;
    let dealer = ensure_dealer_exists(&state, sale.dealer_id).await?;

    let record = state
        .sales
        .replace(id, sale)
        .await?
        .ok_or_else(|| AppError::not_found("Sale not found"))?;

    Ok(Json(SaleResponse::new(record, dealer)))
}

// DELETE /backend/sales/{id}/delete
#[instrument(skip(state))]
pub async fn delete_sale(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    auth.require_admin("delete sales")?;

    if !state.sales.delete(id).await? {
        return Err(AppError::not_found("Sale not found"));
    }

    info!(id, user = %auth.username, "Sale deleted");
    Ok(StatusCode::NO_CONTENT)
}

// POST /backend/sales/preview
#[instrument(skip_all)]
pub async fn preview_sale(Json(payload): Json<PreviewRequest>) -> Json<WorksheetResponse> {
    let sheet = Worksheet::new(payload.items, payload.surcharges);
    Json(WorksheetResponse::from(&sheet))
}
