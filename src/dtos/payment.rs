use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::{required_text, DealerRef};
use crate::billing::Amount;
use crate::error::AppError;
use crate::models::payment::Payment;
use crate::models::Record;
use crate::search::Searchable;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(alias = "orderDate")]
    pub date: NaiveDate,
    pub dealer_id: i64,
    #[serde(default, alias = "totalAmount")]
    pub amount: Amount,
    #[serde(default)]
    pub payment_mode: String,
}

impl PaymentRequest {
    pub fn into_payment(self) -> Result<Payment, AppError> {
        if self.amount.is_zero() {
            return Err(AppError::validation("Payment amount must be greater than 0"));
        }

        Ok(Payment {
            date: self.date,
            dealer_id: self.dealer_id,
            amount: self.amount,
            payment_mode: required_text(&self.payment_mode, "Payment mode is required")?,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub dealer: DealerRef,
    pub amount: Amount,
    pub payment_mode: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentResponse {
    pub fn new(record: Record<Payment>, dealer: DealerRef) -> Self {
        PaymentResponse {
            id: record.id,
            date: record.data.date,
            dealer,
            amount: record.data.amount,
            payment_mode: record.data.payment_mode,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl Searchable for PaymentResponse {
    fn party_name(&self) -> &str {
        &self.dealer.dealer_name
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn total_amount(&self) -> Option<Amount> {
        Some(self.amount)
    }

    fn extra_terms(&self) -> Vec<&str> {
        vec![self.payment_mode.as_str()]
    }
}
