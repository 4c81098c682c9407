use serde::{Deserialize, Serialize};

use super::Document;
use crate::billing::{Amount, Worksheet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    #[serde(alias = "productName")]
    pub name: String,
    #[serde(default, alias = "productPrice")]
    pub price: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dealer {
    pub name: String,
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
}

impl Dealer {
    /// Zero-quantity lines for every catalog product, ready for a new sale.
    pub fn sale_worksheet(&self) -> Worksheet {
        Worksheet::from_catalog(self.products.iter().map(|p| (p.name.clone(), p.price)))
    }
}

impl Document for Dealer {
    const COLLECTION: &'static str = "dealers";
}
