use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Document;
use crate::billing::Amount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub date: NaiveDate,
    pub dealer_id: i64,
    pub amount: Amount,
    pub payment_mode: String,
}

impl Document for Payment {
    const COLLECTION: &'static str = "payments";

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}
