//! Free-text and date-range filtering over already fetched records.

use chrono::NaiveDate;

use crate::billing::Amount;

/// What a record exposes to the search box.
pub trait Searchable {
    fn party_name(&self) -> &str;

    fn record_date(&self) -> Option<NaiveDate>;

    /// `None` for records that carry no amount; they never match numeric queries.
    fn total_amount(&self) -> Option<Amount>;

    /// Additional fields the query may hit (phone, courier, ...).
    fn extra_terms(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// Inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Keeps the records whose party name, ISO date or total contains `query`
/// (case-insensitive) and whose date lies inside `range`, when given.
pub fn filter_records<T: Searchable>(records: Vec<T>, query: &str, range: Option<DateRange>) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    records
        .into_iter()
        .filter(|record| in_range(record, range.as_ref()) && matches_needle(record, &needle))
        .collect()
}

pub fn matches<T: Searchable + ?Sized>(record: &T, query: &str, range: Option<&DateRange>) -> bool {
    in_range(record, range) && matches_needle(record, &query.trim().to_lowercase())
}

fn in_range<T: Searchable + ?Sized>(record: &T, range: Option<&DateRange>) -> bool {
    match range {
        None => true,
        Some(range) => record.record_date().is_some_and(|date| range.contains(date)),
    }
}

// `needle` is already trimmed and lowercased.
fn matches_needle<T: Searchable + ?Sized>(record: &T, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    let hit = |text: &str| text.to_lowercase().contains(needle);

    hit(record.party_name())
        || record
            .record_date()
            .is_some_and(|date| hit(&date.format("%Y-%m-%d").to_string()))
        || record.total_amount().is_some_and(|total| hit(&total.to_string()))
        || record.extra_terms().into_iter().any(hit)
}
