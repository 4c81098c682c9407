use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Document;
use crate::billing::Amount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Amount,
}

impl Document for Expense {
    const COLLECTION: &'static str = "expenses";

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}
