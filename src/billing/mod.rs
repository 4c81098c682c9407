//! Line totals, surcharges and order totals.

pub mod amount;
pub mod totals;
pub mod worksheet;

pub use amount::{Amount, Quantity};
pub use totals::{compute_totals, LineItem, Surcharges, Totals};
pub use worksheet::Worksheet;
