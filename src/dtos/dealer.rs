use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::{line_views, required_text, DealerRef, LineView};
use crate::billing::{Amount, Surcharges, Totals, Worksheet};
use crate::error::AppError;
use crate::models::dealer::{CatalogProduct, Dealer};
use crate::models::Record;
use crate::search::Searchable;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerRequest {
    #[serde(alias = "dealerName")]
    pub name: String,
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
}

impl DealerRequest {
    pub fn into_dealer(self) -> Result<Dealer, AppError> {
        let name = required_text(&self.name, "Dealer name is required")?;
        let products = self
            .products
            .into_iter()
            .map(|p| {
                Ok(CatalogProduct {
                    name: required_text(&p.name, "Every product needs a name")?,
                    price: p.price,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Dealer { name, products })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerResponse {
    pub id: i64,
    pub dealer_name: String,
    pub products: Vec<CatalogProduct>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Record<Dealer>> for DealerResponse {
    fn from(record: Record<Dealer>) -> Self {
        DealerResponse {
            id: record.id,
            dealer_name: record.data.name,
            products: record.data.products,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl Searchable for DealerResponse {
    fn party_name(&self) -> &str {
        &self.dealer_name
    }

    fn record_date(&self) -> Option<NaiveDate> {
        None
    }

    fn total_amount(&self) -> Option<Amount> {
        None
    }
}

/// Lines, surcharges and totals of an unsaved order.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetResponse {
    pub items: Vec<LineView>,
    pub surcharges: Surcharges,
    #[serde(flatten)]
    pub totals: Totals,
}

impl From<&Worksheet> for WorksheetResponse {
    fn from(sheet: &Worksheet) -> Self {
        WorksheetResponse {
            items: line_views(sheet.items()),
            surcharges: sheet.surcharges().clone(),
            totals: sheet.totals(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleTemplateResponse {
    pub dealer: DealerRef,
    #[serde(flatten)]
    pub worksheet: WorksheetResponse,
}
