use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Document;
use crate::billing::{compute_totals, LineItem, Surcharges, Totals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSource {
    Website,
    WhatsApp,
    App,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineOrder {
    pub order_date: NaiveDate,
    pub customer_name: String,
    pub phone_no: Option<String>,
    pub area: Option<String>,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub surcharges: Surcharges,
    pub weight: Option<String>,
    pub courier: Option<String>,
    pub tracking_number: Option<String>,
    pub order_source: Option<OrderSource>,
}

impl OnlineOrder {
    pub fn totals(&self) -> Totals {
        compute_totals(&self.items, &self.surcharges)
    }
}

impl Document for OnlineOrder {
    const COLLECTION: &'static str = "online_orders";

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.order_date)
    }
}
