use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::billing::{Amount, LineItem, Quantity};
use crate::error::AppError;
use crate::search::DateRange;

/// `?search=&startDate=&endDate=` on every list endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub search: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ListQuery {
    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }

    /// A range only applies when both ends are present and non-empty.
    pub fn date_range(&self) -> Result<Option<DateRange>, AppError> {
        let start = self.start_date.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let end = self.end_date.as_deref().map(str::trim).filter(|s| !s.is_empty());

        match (start, end) {
            (Some(start), Some(end)) => Ok(Some(DateRange::new(
                parse_date("startDate", start)?,
                parse_date("endDate", end)?,
            ))),
            _ => Ok(None),
        }
    }
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("{field} must be a YYYY-MM-DD date")))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerRef {
    pub id: i64,
    pub dealer_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub name: String,
    pub unit_price: Amount,
    pub quantity: Quantity,
    pub line_total: Amount,
}

impl From<&LineItem> for LineView {
    fn from(item: &LineItem) -> Self {
        LineView {
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_total: item.line_total(),
        }
    }
}

pub fn line_views(items: &[LineItem]) -> Vec<LineView> {
    items.iter().map(LineView::from).collect()
}

pub fn required_text(value: &str, message: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(trimmed.to_string())
}

pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trims product names and rejects unnamed lines.
pub fn clean_items(items: Vec<LineItem>) -> Result<Vec<LineItem>, AppError> {
    items
        .into_iter()
        .map(|mut item| {
            item.name = required_text(&item.name, "Every item needs a product name")?;
            Ok(item)
        })
        .collect()
}
