use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Dated, Located, StoreLocation};
use crate::store::{EntityConfig, Record};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Milestone {
    #[serde(rename = "1 Month")]
    OneMonth,
    #[serde(rename = "6 Months")]
    SixMonths,
    #[serde(rename = "1 Year")]
    OneYear,
    Anniversary,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum FeedbackCategory {
    Concern,
    Praise,
    Suggestion,
}

/// A touchpoint with a pet parent. Append-only.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Engagement {
    pub id: String,
    pub parent_name: String,
    pub milestone: Milestone,
    pub feedback_category: FeedbackCategory,
    pub notes: String,
    pub staff_id: String,
    pub store: StoreLocation,
    pub created_at: DateTime<Utc>,
}

impl Record for Engagement {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Located for Engagement {
    fn store(&self) -> StoreLocation {
        self.store
    }
}

impl Dated for Engagement {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

pub static CONFIG: EntityConfig<Engagement> = EntityConfig {
    entity_name: "engagement",
    index_name: "engagements_all",
    seed: Vec::new,
};
