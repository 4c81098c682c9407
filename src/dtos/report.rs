use serde::{Deserialize, Serialize};

use crate::billing::Amount;
use crate::reports::PartyShare;

#[derive(Debug, Deserialize)]
pub struct DealerSalesQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerSalesResponse {
    pub year: i32,
    pub month: u32,
    pub total: Amount,
    pub dealers: Vec<PartyShare>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionTotal {
    pub count: usize,
    pub total: Amount,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsResponse {
    pub sales: CollectionTotal,
    pub online_orders: CollectionTotal,
    pub payments: CollectionTotal,
    pub expenses: CollectionTotal,
}
