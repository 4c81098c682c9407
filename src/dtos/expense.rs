use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::required_text;
use crate::billing::Amount;
use crate::error::AppError;
use crate::models::expense::Expense;
use crate::models::Record;
use crate::search::Searchable;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRequest {
    pub date: NaiveDate,
    #[serde(alias = "desc")]
    pub description: String,
    #[serde(default)]
    pub amount: Amount,
}

impl ExpenseRequest {
    pub fn into_expense(self) -> Result<Expense, AppError> {
        if self.amount.is_zero() {
            return Err(AppError::validation("Expense amount must be greater than 0"));
        }

        Ok(Expense {
            date: self.date,
            description: required_text(&self.description, "Description is required")?,
            amount: self.amount,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Amount,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Record<Expense>> for ExpenseResponse {
    fn from(record: Record<Expense>) -> Self {
        ExpenseResponse {
            id: record.id,
            date: record.data.date,
            description: record.data.description,
            amount: record.data.amount,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

// Expenses have no counterparty; the description takes its place in search.
impl Searchable for ExpenseResponse {
    fn party_name(&self) -> &str {
        &self.description
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn total_amount(&self) -> Option<Amount> {
        Some(self.amount)
    }
}
