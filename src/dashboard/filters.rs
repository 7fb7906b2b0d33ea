use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::model::{Dated, Located, StoreLocation};

/// Which store's records a view covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum StoreFilter {
    #[default]
    All,
    Only(StoreLocation),
}

impl TryFrom<String> for StoreFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "all" {
            return Ok(StoreFilter::All);
        }
        value.parse().map(StoreFilter::Only)
    }
}

impl fmt::Display for StoreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreFilter::All => f.write_str("all"),
            StoreFilter::Only(store) => store.fmt(f),
        }
    }
}

impl Serialize for StoreFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Inclusive range of calendar days (UTC). No `from` means unbounded; no `to`
/// means the single day `from`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        match self.from {
            None => true,
            Some(from) => from <= day && day <= self.to.unwrap_or(from),
        }
    }
}

pub fn filter_by_store<T: Located + Clone>(items: &[T], filter: StoreFilter) -> Vec<T> {
    match filter {
        StoreFilter::All => items.to_vec(),
        StoreFilter::Only(store) => items
            .iter()
            .filter(|item| item.store() == store)
            .cloned()
            .collect(),
    }
}

/// Items without any usable date are dropped once a range is set.
pub fn filter_by_date_range<T: Dated + Clone>(items: &[T], range: DateRange) -> Vec<T> {
    if range.from.is_none() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| {
            item.effective_date()
                .is_some_and(|date| range.contains(date.date_naive()))
        })
        .cloned()
        .collect()
}
