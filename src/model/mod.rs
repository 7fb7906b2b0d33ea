//! Domain records persisted through the indexed entity store.
//!
//! Every record serializes with the camelCase field names and literal enum
//! strings the dashboard client already speaks.

pub mod dog;
pub mod engagement;
pub mod meet_and_greet;
pub mod observation;
pub mod shift_report;
pub mod staff;

pub use dog::Dog;
pub use engagement::{Engagement, FeedbackCategory, Milestone};
pub use meet_and_greet::{MeetAndGreet, MeetAndGreetStatus};
pub use observation::{Observation, ObservationType, Shift};
pub use shift_report::ShiftReport;
pub use staff::{Role, Staff};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the business's physical sites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum StoreLocation {
    Ellisville,
    #[serde(rename = "Rock Hill")]
    RockHill,
}

impl StoreLocation {
    pub const ALL: [StoreLocation; 2] = [StoreLocation::Ellisville, StoreLocation::RockHill];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreLocation::Ellisville => "Ellisville",
            StoreLocation::RockHill => "Rock Hill",
        }
    }

    /// Cookie- and URL-safe form.
    pub fn slug(&self) -> &'static str {
        match self {
            StoreLocation::Ellisville => "ellisville",
            StoreLocation::RockHill => "rock-hill",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        StoreLocation::ALL.into_iter().find(|store| store.slug() == slug)
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StoreLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StoreLocation::ALL
            .into_iter()
            .find(|store| store.as_str() == s)
            .ok_or_else(|| format!("unknown store location: {s}"))
    }
}

/// Records that belong to a store location.
pub trait Located {
    fn store(&self) -> StoreLocation;
}

/// Records the dashboard can place on a calendar.
///
/// Candidates are checked in the order `createdAt`, `greetDateTime`, `date`;
/// the first one the record carries wins.
pub trait Dated {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn greet_date_time(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn date(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn effective_date(&self) -> Option<DateTime<Utc>> {
        self.created_at()
            .or_else(|| self.greet_date_time())
            .or_else(|| self.date())
    }
}
