use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::{clean_items, line_views, optional_text, required_text, LineView};
use crate::billing::{Amount, LineItem, Surcharges, Totals};
use crate::error::AppError;
use crate::models::online_order::{OnlineOrder, OrderSource};
use crate::models::Record;
use crate::search::Searchable;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineOrderRequest {
    pub order_date: NaiveDate,
    pub customer_name: String,
    pub phone_no: Option<String>,
    pub area: Option<String>,
    #[serde(default, alias = "products")]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub surcharges: Surcharges,
    pub weight: Option<String>,
    pub courier: Option<String>,
    pub tracking_number: Option<String>,
    pub order_source: Option<OrderSource>,
}

impl OnlineOrderRequest {
    pub fn into_order(self) -> Result<OnlineOrder, AppError> {
        if self.items.is_empty() {
            return Err(AppError::validation("Order must contain at least one item"));
        }

        Ok(OnlineOrder {
            order_date: self.order_date,
            customer_name: required_text(&self.customer_name, "Customer name is required")?,
            phone_no: optional_text(self.phone_no),
            area: optional_text(self.area),
            items: clean_items(self.items)?,
            surcharges: self.surcharges,
            weight: optional_text(self.weight),
            courier: optional_text(self.courier),
            tracking_number: optional_text(self.tracking_number),
            order_source: self.order_source,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineOrderResponse {
    pub id: i64,
    pub order_date: NaiveDate,
    pub customer_name: String,
    pub phone_no: Option<String>,
    pub area: Option<String>,
    pub items: Vec<LineView>,
    pub surcharges: Surcharges,
    #[serde(flatten)]
    pub totals: Totals,
    pub weight: Option<String>,
    pub courier: Option<String>,
    pub tracking_number: Option<String>,
    pub order_source: Option<OrderSource>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Record<OnlineOrder>> for OnlineOrderResponse {
    fn from(record: Record<OnlineOrder>) -> Self {
        let totals = record.data.totals();
        let order = record.data;
        OnlineOrderResponse {
            id: record.id,
            order_date: order.order_date,
            customer_name: order.customer_name,
            phone_no: order.phone_no,
            area: order.area,
            items: line_views(&order.items),
            surcharges: order.surcharges,
            totals,
            weight: order.weight,
            courier: order.courier,
            tracking_number: order.tracking_number,
            order_source: order.order_source,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl Searchable for OnlineOrderResponse {
    fn party_name(&self) -> &str {
        &self.customer_name
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.order_date)
    }

    fn total_amount(&self) -> Option<Amount> {
        Some(self.totals.final_total)
    }

    fn extra_terms(&self) -> Vec<&str> {
        [&self.phone_no, &self.area, &self.courier, &self.tracking_number]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .collect()
    }
}
