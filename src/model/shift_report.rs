use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Dated, Located, StoreLocation};
use crate::store::{EntityConfig, Record};

/// End-of-shift summary filed by a shift lead.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftReport {
    pub id: String,
    pub date: DateTime<Utc>,
    pub shift_lead_id: String,
    pub enrollment_adds: u32,
    pub enrollment_drops: u32,
    pub enrollment_pauses: u32,
    pub new_visits: u32,
    pub return_visits: u32,
    pub issues: String,
    pub staff_highlights: String,
    pub capacity: u32,
    pub store: StoreLocation,
}

impl Record for ShiftReport {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Located for ShiftReport {
    fn store(&self) -> StoreLocation {
        self.store
    }
}

impl Dated for ShiftReport {
    fn date(&self) -> Option<DateTime<Utc>> {
        Some(self.date)
    }
}

pub static CONFIG: EntityConfig<ShiftReport> = EntityConfig {
    entity_name: "shiftReport",
    index_name: "shiftReports_all",
    seed: Vec::new,
};
