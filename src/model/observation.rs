use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Dated, Located, StoreLocation};
use crate::store::{EntityConfig, Record};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Shift {
    #[default]
    AM,
    PM,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ObservationType {
    Confidence,
    Socialization,
    Behavior,
    #[serde(rename = "Training Readiness")]
    TrainingReadiness,
}

/// A behavioral note about one dog during one shift.
///
/// `dog_name` is copied from the dog when the observation is written and is
/// never refreshed afterwards; renaming a dog leaves older observations with
/// the old name.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: String,
    pub dog_id: String,
    pub dog_name: String,
    pub date: DateTime<Utc>,
    pub shift: Shift,
    pub observation_type: ObservationType,
    pub notes: String,
    pub staff_id: String,
    pub store: StoreLocation,
}

impl Record for Observation {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Located for Observation {
    fn store(&self) -> StoreLocation {
        self.store
    }
}

impl Dated for Observation {
    fn date(&self) -> Option<DateTime<Utc>> {
        Some(self.date)
    }
}

pub static CONFIG: EntityConfig<Observation> = EntityConfig {
    entity_name: "observation",
    index_name: "observations_all",
    seed: Vec::new,
};
