use serde::{Deserialize, Serialize};

use super::StoreLocation;
use crate::store::{EntityConfig, Record};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    FrontDesk,
    ShiftLead,
    Manager,
    Owner,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub store: StoreLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Record for Staff {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

pub static CONFIG: EntityConfig<Staff> = EntityConfig {
    entity_name: "staff",
    index_name: "staff_all",
    seed: seed_staff,
};

fn member(id: &str, name: &str, role: Role, store: StoreLocation) -> Staff {
    Staff {
        id: id.to_string(),
        name: name.to_string(),
        role,
        store,
        avatar_url: None,
    }
}

fn seed_staff() -> Vec<Staff> {
    vec![
        member("user-1", "Alice Johnson", Role::FrontDesk, StoreLocation::Ellisville),
        member("user-2", "Bob Williams", Role::ShiftLead, StoreLocation::Ellisville),
        member("user-3", "Charlie Brown", Role::Manager, StoreLocation::RockHill),
        member("user-4", "Diana Miller", Role::FrontDesk, StoreLocation::RockHill),
    ]
}

/// The staff member a demo sign-in picks for each role.
pub fn demo_member(role: Role) -> Staff {
    let mut staff = match role {
        Role::FrontDesk => member("user-1", "Alice Johnson", role, StoreLocation::Ellisville),
        Role::ShiftLead => member("user-2", "Bob Williams", role, StoreLocation::Ellisville),
        Role::Manager => member("user-3", "Charlie Brown", role, StoreLocation::RockHill),
        Role::Owner => member("user-5", "Eve Davis", role, StoreLocation::Ellisville),
    };
    staff.avatar_url = Some(format!("https://i.pravatar.cc/150?u={}", staff.id));
    staff
}

/// Looks a demo roster member up by id.
pub fn demo_member_by_id(id: &str) -> Option<Staff> {
    [Role::FrontDesk, Role::ShiftLead, Role::Manager, Role::Owner]
        .into_iter()
        .map(demo_member)
        .find(|staff| staff.id == id)
}
