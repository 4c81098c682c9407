use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, instrument};

use super::dealer::{dealer_directory, dealer_ref, ensure_dealer_exists};
use crate::dtos::common::ListQuery;
use crate::dtos::payment::{PaymentRequest, PaymentResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::search::filter_records;
use crate::state::AppState;

pub(crate) async fn load_payments(state: &AppState) -> Result<Vec<PaymentResponse>, AppError> {
    let directory = dealer_directory(state).await?;
    Ok(state
        .payments
        .list()
        .await?
        .into_iter()
        .map(|record| {
            let dealer = dealer_ref(&directory, record.data.dealer_id);
            PaymentResponse::new(record, dealer)
        })
        .collect())
}

#[instrument(skip(state))]
pub async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PaymentResponse>>, AppError> {
    let range = query.date_range()?;
    let payments = load_payments(&state).await?;
    Ok(Json(filter_records(payments, query.search(), range)))
}

#[instrument(skip(state))]
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PaymentResponse>, AppError> {
    let record = state
        .payments
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Payment not found"))?;

    let directory = dealer_directory(&state).await?;
    let dealer = dealer_ref(&directory, record.data.dealer_id);
    Ok(Json(PaymentResponse::new(record, dealer)))
}

#[instrument(skip(state, payload))]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<PaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>), AppError> {
    let payment = payload.into_payment()?;
    let dealer = ensure_dealer_exists(&state, payment.dealer_id).await?;

    let record = state.payments.insert(payment).await?;
    info!(id = record.id, dealer_id = dealer.id, "Payment recorded");

    Ok((StatusCode::CREATED, Json(PaymentResponse::new(record, dealer))))
}

#[instrument(skip(state, payload))]
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentRequest>,
) -> Result<Json<PaymentResponse>, AppError> {
    let payment = payload.into_payment()?;
    let dealer = ensure_dealer_exists(&state, payment.dealer_id).await?;

    let record = state
        .payments
        .replace(id, payment)
        .await?
        .ok_or_else(|| AppError::not_found("Payment not found"))?;

    Ok(Json(PaymentResponse::new(record, dealer)))
}

#[instrument(skip(state))]
pub async fn delete_payment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    auth.require_admin("delete payments")?;

    if !state.payments.delete(id).await? {
        return Err(AppError::not_found("Payment not found"));
    }

    info!(id, user = %auth.username, "Payment deleted");
    Ok(StatusCode::NO_CONTENT)
}
