use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Document;
use crate::billing::{compute_totals, LineItem, Surcharges, Totals};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub date: NaiveDate,
    pub dealer_id: i64,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub surcharges: Surcharges,
}

impl Sale {
    pub fn totals(&self) -> Totals {
        compute_totals(&self.items, &self.surcharges)
    }
}

impl Document for Sale {
    const COLLECTION: &'static str = "sales";

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}
