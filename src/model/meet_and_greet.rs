use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{Dated, Located, StoreLocation};
use crate::store::{EntityConfig, Record};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum MeetAndGreetStatus {
    #[default]
    Attended,
    #[serde(rename = "No-Show")]
    NoShow,
    Cancelled,
    Rescheduled,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetAndGreet {
    pub id: String,
    pub pet_name: String,
    pub owner_name: String,
    pub greet_date_time: DateTime<Utc>,
    pub status: MeetAndGreetStatus,
    pub converted: bool,
    pub staff_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub store: StoreLocation,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for MeetAndGreet {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    // updatedAt must move forward even when two writes land in the same tick.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::milliseconds(1)
        };
    }
}

impl Located for MeetAndGreet {
    fn store(&self) -> StoreLocation {
        self.store
    }
}

impl Dated for MeetAndGreet {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }

    fn greet_date_time(&self) -> Option<DateTime<Utc>> {
        Some(self.greet_date_time)
    }
}

pub static CONFIG: EntityConfig<MeetAndGreet> = EntityConfig {
    entity_name: "meetAndGreet",
    index_name: "meetAndGreets_all",
    seed: seed_meet_and_greets,
};

fn seed_meet_and_greets() -> Vec<MeetAndGreet> {
    let now = Utc::now();
    let greet = |id: &str,
                 pet: &str,
                 owner: &str,
                 days_ago: i64,
                 status: MeetAndGreetStatus,
                 converted: bool,
                 staff: &str,
                 notes: Option<&str>,
                 store: StoreLocation| {
        MeetAndGreet {
            id: id.to_string(),
            pet_name: pet.to_string(),
            owner_name: owner.to_string(),
            greet_date_time: now - Duration::days(days_ago),
            status,
            converted,
            staff_id: staff.to_string(),
            notes: notes.map(str::to_string),
            store,
            created_at: now,
            updated_at: now,
        }
    };

    vec![
        greet(
            "mg-1",
            "Buddy",
            "John Doe",
            1,
            MeetAndGreetStatus::Attended,
            true,
            "user-1",
            Some("Very friendly golden retriever."),
            StoreLocation::Ellisville,
        ),
        greet(
            "mg-2",
            "Lucy",
            "Jane Smith",
            2,
            MeetAndGreetStatus::Attended,
            false,
            "user-2",
            Some("A bit shy at first."),
            StoreLocation::Ellisville,
        ),
        greet(
            "mg-3",
            "Max",
            "Peter Jones",
            0,
            MeetAndGreetStatus::NoShow,
            false,
            "user-4",
            None,
            StoreLocation::RockHill,
        ),
    ]
}
