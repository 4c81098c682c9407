pub mod dealer;
pub mod expense;
pub mod online_order;
pub mod payment;
pub mod sale;
pub mod user;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Serialize};

/// A business record persisted as a JSON document in its own collection.
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Table (or collection) name.
    const COLLECTION: &'static str;

    /// Date used for ordering and range filtering.
    fn record_date(&self) -> Option<NaiveDate> {
        None
    }
}

/// A stored document together with its identity and timestamps.
#[derive(Debug, Clone)]
pub struct Record<T> {
    pub id: i64,
    pub data: T,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
