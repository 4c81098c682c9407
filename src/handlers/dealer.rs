use std::collections::HashMap;

use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, instrument};

use crate::dtos::common::{DealerRef, ListQuery};
use crate::dtos::dealer::{DealerRequest, DealerResponse, SaleTemplateResponse, WorksheetResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::search::filter_records;
use crate::state::AppState;

/// Dealer names keyed by id, for resolving references in sales and payments.
pub(crate) async fn dealer_directory(state: &AppState) -> Result<HashMap<i64, String>, AppError> {
    Ok(state
        .dealers
        .list()
        .await?
        .into_iter()
        .map(|record| (record.id, record.data.name))
        .collect())
}

/// A dealer reference; dangling ids resolve to an empty name.
pub(crate) fn dealer_ref(directory: &HashMap<i64, String>, id: i64) -> DealerRef {
    DealerRef {
        id,
        dealer_name: directory.get(&id).cloned().unwrap_or_default(),
    }
}

pub(crate) async fn ensure_dealer_exists(state: &AppState, id: i64) -> Result<DealerRef, AppError> {
    let dealer = state
        .dealers
        .get(id)
        .await?
        .ok_or_else(|| AppError::validation(format!("Dealer {id} does not exist")))?;
    Ok(DealerRef {
        id,
        dealer_name: dealer.data.name,
    })
}

// GET /backend/dealers
#[instrument(skip(state))]
pub async fn list_dealers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<DealerResponse>>, AppError> {
    let dealers = state
        .dealers
        .list()
        .await?
        .into_iter()
        .map(DealerResponse::from)
        .collect();

    Ok(Json(filter_records(dealers, query.search(), None)))
}

// GET /backend/dealers/{id}
#[instrument(skip(state))]
pub async fn get_dealer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DealerResponse>, AppError> {
    let dealer = state
        .dealers
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Dealer not found"))?;

    Ok(Json(DealerResponse::from(dealer)))
}

// POST /backend/dealers
#[instrument(skip(state, payload))]
pub async fn create_dealer(
    State(state): State<AppState>,
    Json(payload): Json<DealerRequest>,
) -> Result<(StatusCode, Json<DealerResponse>), AppError> {
    let dealer = payload.into_dealer()?;
    let record = state.dealers.insert(dealer).await?;
    info!(id = record.id, "Dealer created");

    Ok((StatusCode::CREATED, Json(DealerResponse::from(record))))
}

// PUT /backend/dealers/{id}/edit
#[instrument(skip(state, payload))]
pub async fn update_dealer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DealerRequest>,
) -> Result<Json<DealerResponse>, AppError> {
    let dealer = payload.into_dealer()?;
    let record = state
        .dealers
        .replace(id, dealer)
        .await?
        .ok_or_else(|| AppError::not_found("Dealer not found"))?;

    Ok(Json(DealerResponse::from(record)))
}

// DELETE /backend/dealers/{id}/delete
#[instrument(skip(state))]
pub async fn delete_dealer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    auth.require_admin("delete dealers")?;

    if state.dealers.get(id).await?.is_none() {
        return Err(AppError::not_found("Dealer not found"));
    }

    let has_sales = state.sales.list().await?.iter().any(|s| s.data.dealer_id == id);
    let has_payments = state.payments.list().await?.iter().any(|p| p.data.dealer_id == id);
    if has_sales || has_payments {
        return Err(AppError::conflict(
            "Dealer has sales or payments and cannot be deleted",
        ));
    }

    // Postgres enforces sale and payment references with foreign keys, so a
    // reference recorded after the scan above still fails this delete with 409.
    if !state.dealers.delete(id).await? {
        return Err(AppError::not_found("Dealer not found"));
    }
    info!(id, user = %auth.username, "Dealer deleted");
    Ok(StatusCode::NO_CONTENT)
}

// GET /backend/dealers/{id}/sale-template
#[instrument(skip(state))]
pub async fn sale_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SaleTemplateResponse>, AppError> {
    let dealer = state
        .dealers
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Dealer not found"))?;

    let sheet = dealer.data.sale_worksheet();
    Ok(Json(SaleTemplateResponse {
        dealer: DealerRef {
            id: dealer.id,
            dealer_name: dealer.data.name,
        },
        worksheet: WorksheetResponse::from(&sheet),
    }))
}
