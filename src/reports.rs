//! Aggregations behind the dashboard charts and table footers.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::billing::Amount;
use crate::search::Searchable;

pub const UNKNOWN_PARTY: &str = "Unknown Dealer";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    /// `YYYY-MM`
    pub month: String,
    /// `Jan 2024`
    pub label: String,
    pub total: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyShare {
    pub party: String,
    pub total: Amount,
    pub percentage: f64,
}

pub fn grand_total<T: Searchable>(records: &[T]) -> Amount {
    records.iter().filter_map(Searchable::total_amount).sum()
}

/// Totals per calendar month, oldest first. Undated records are skipped.
pub fn monthly_trend<T: Searchable>(records: &[T]) -> Vec<MonthlyTotal> {
    let mut months: BTreeMap<(i32, u32), Amount> = BTreeMap::new();
    for record in records {
        if let Some(date) = record.record_date() {
            let slot = months.entry((date.year(), date.month())).or_default();
            *slot = *slot + record.total_amount().unwrap_or_default();
        }
    }

    months
        .into_iter()
        .map(|((year, month), total)| MonthlyTotal {
            month: format!("{year:04}-{month:02}"),
            label: NaiveDate::from_ymd_opt(year, month, 1)
                .map(|first| first.format("%b %Y").to_string())
                .unwrap_or_default(),
            total,
        })
        .collect()
}

/// Per-party totals for one month, largest first.
pub fn party_breakdown<T: Searchable>(records: &[T], year: i32, month: u32) -> Vec<PartyShare> {
    let mut parties: BTreeMap<String, Amount> = BTreeMap::new();
    for record in records {
        let in_month = record
            .record_date()
            .is_some_and(|date| date.year() == year && date.month() == month);
        if !in_month {
            continue;
        }

        let name = match record.party_name().trim() {
            "" => UNKNOWN_PARTY.to_string(),
            name => name.to_string(),
        };
        let slot = parties.entry(name).or_default();
        *slot = *slot + record.total_amount().unwrap_or_default();
    }

    let month_total: Amount = parties.values().sum();
    let mut shares: Vec<PartyShare> = parties
        .into_iter()
        .map(|(party, total)| PartyShare {
            percentage: if month_total.is_zero() {
                0.0
            } else {
                (total.decimal() / month_total.decimal() * Decimal::ONE_HUNDRED)
                    .to_f64()
                    .unwrap_or_default()
            },
            party,
            total,
        })
        .collect();

    // BTreeMap order already sorts by name; a stable sort keeps that for ties.
    shares.sort_by(|a, b| b.total.cmp(&a.total));
    shares
}
