use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, instrument};

use crate::dtos::common::ListQuery;
use crate::dtos::expense::{ExpenseRequest, ExpenseResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::search::filter_records;
use crate::state::AppState;

pub(crate) async fn load_expenses(state: &AppState) -> Result<Vec<ExpenseResponse>, AppError> {
    Ok(state
        .expenses
        .list()
        .await?
        .into_iter()
        .map(ExpenseResponse::from)
        .collect())
}

#[instrument(skip(state))]
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ExpenseResponse>>, AppError> {
    let range = query.date_range()?;
    let expenses = load_expenses(&state).await?;
    Ok(Json(filter_records(expenses, query.search(), range)))
}

#[instrument(skip(state))]
pub async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ExpenseResponse>, AppError> {
    let record = state
        .expenses
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Expense not found"))?;

    Ok(Json(ExpenseResponse::from(record)))
}

#[instrument(skip(state, payload))]
pub async fn create_expense(
    State(state): State<AppState>,
    Json(payload): Json<ExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseResponse>), AppError> {
    let expense = payload.into_expense()?;
    let record = state.expenses.insert(expense).await?;
    info!(id = record.id, "Expense recorded");

    Ok((StatusCode::CREATED, Json(ExpenseResponse::from(record))))
}

#[instrument(skip(state, payload))]
pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ExpenseRequest>,
) -> Result<Json<ExpenseResponse>, AppError> {
    let expense = payload.into_expense()?;
    let record = state
        .expenses
        .replace(id, expense)
        .await?
        .ok_or_else(|| AppError::not_found("Expense not found"))?;

    Ok(Json(ExpenseResponse::from(record)))
}

#[instrument(skip(state))]
pub async fn delete_expense(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    auth.require_admin("delete expenses")?;

    if !state.expenses.delete(id).await? {
        return Err(AppError::not_found("Expense not found"));
    }

    info!(id, user = %auth.username, "Expense deleted");
    Ok(StatusCode::NO_CONTENT)
}
