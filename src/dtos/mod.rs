pub mod common;
pub mod dealer;
pub mod expense;
pub mod online_order;
pub mod payment;
pub mod report;
pub mod sale;
pub mod user;
