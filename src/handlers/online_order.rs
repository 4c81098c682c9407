use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, instrument};

use crate::dtos::common::ListQuery;
use crate::dtos::online_order::{OnlineOrderRequest, OnlineOrderResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::search::filter_records;
use crate::state::AppState;

pub(crate) async fn load_orders(state: &AppState) -> Result<Vec<OnlineOrderResponse>, AppError> {
    Ok(state
        .online_orders
        .list()
        .await?
        .into_iter()
        .map(OnlineOrderResponse::from)
        .collect())
}

#[instrument(skip(state))]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<OnlineOrderResponse>>, AppError> {
    let range = query.date_range()?;
    let orders = load_orders(&state).await?;
    Ok(Json(filter_records(orders, query.search(), range)))
}

#[instrument(skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OnlineOrderResponse>, AppError> {
    let record = state
        .online_orders
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Online order not found"))?;

    Ok(Json(OnlineOrderResponse::from(record)))
}

#[instrument(skip(state, payload))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<OnlineOrderRequest>,
) -> Result<(StatusCode, Json<OnlineOrderResponse>), AppError> {
    let order = payload.into_order()?;
    let record = state.online_orders.insert(order).await?;
    info!(id = record.id, "Online order recorded");

    Ok((StatusCode::CREATED, Json(OnlineOrderResponse::from(record))))
}

#[instrument(skip(state, payload))]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OnlineOrderRequest>,
) -> Result<Json<OnlineOrderResponse>, AppError> {
    let order = payload.into_order()?;
    let record = state
        .online_orders
        .replace(id, order)
        .await?
        .ok_or_else(|| AppError::not_found("Online order not found"))?;

    Ok(Json(OnlineOrderResponse::from(record)))
}

#[instrument(skip(state))]
pub async fn delete_order(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    auth.require_admin("delete online orders")?;

    if !state.online_orders.delete(id).await? {
        return Err(AppError::not_found("Online order not found"));
    }

    info!(id, user = %auth.username, "Online order deleted");
    Ok(StatusCode::NO_CONTENT)
}
