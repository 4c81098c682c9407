use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::{clean_items, line_views, DealerRef, LineView};
use crate::billing::{Amount, LineItem, Surcharges, Totals};
use crate::error::AppError;
use crate::models::sale::Sale;
use crate::models::Record;
use crate::search::Searchable;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    pub date: NaiveDate,
    pub dealer_id: i64,
    #[serde(default, alias = "products")]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub surcharges: Surcharges,
}

impl SaleRequest {
    /// Lines left at quantity 0 are dropped; any client-side totals are ignored.
    pub fn into_sale(self) -> Result<Sale, AppError> {
        let items: Vec<LineItem> = self
            .items
            .into_iter()
            .filter(|item| !item.quantity.is_zero())
            .collect();

        if items.is_empty() {
            return Err(AppError::validation(
                "Sale must contain at least one item with quantity greater than 0",
            ));
        }

        Ok(Sale {
            date: self.date,
            dealer_id: self.dealer_id,
            items: clean_items(items)?,
            surcharges: self.surcharges,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    #[serde(default, alias = "products")]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub surcharges: Surcharges,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub dealer: DealerRef,
    pub items: Vec<LineView>,
    pub surcharges: Surcharges,
    #[serde(flatten)]
    pub totals: Totals,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SaleResponse {
    pub fn new(record: Record<Sale>, dealer: DealerRef) -> Self {
        let totals = record.data.totals();
        SaleResponse {
            id: record.id,
            date: record.data.date,
            dealer,
            items: line_views(&record.data.items),
            surcharges: record.data.surcharges,
            totals,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl Searchable for SaleResponse {
    fn party_name(&self) -> &str {
        &self.dealer.dealer_name
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn total_amount(&self) -> Option<Amount> {
        Some(self.totals.final_total)
    }
}
