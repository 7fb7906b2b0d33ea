use serde::{Deserialize, Serialize};

use super::StoreLocation;
use crate::store::{EntityConfig, Record};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dog {
    pub id: String,
    pub name: String,
    pub owner_name: String,
    pub store: StoreLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Record for Dog {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

pub static CONFIG: EntityConfig<Dog> = EntityConfig {
    entity_name: "dog",
    index_name: "dogs_all",
    seed: seed_dogs,
};

fn seed_dogs() -> Vec<Dog> {
    let dog = |id: &str, name: &str, owner: &str, store: StoreLocation, photo: &str| Dog {
        id: id.to_string(),
        name: name.to_string(),
        owner_name: owner.to_string(),
        store,
        photo_url: Some(format!("https://images.dog.ceo/breeds/{photo}")),
    };

    vec![
        dog("dog-1", "Buddy", "John Doe", StoreLocation::Ellisville, "retriever-golden/n02099601_3414.jpg"),
        dog("dog-2", "Lucy", "Jane Smith", StoreLocation::Ellisville, "beagle/n02088364_1213.jpg"),
        dog("dog-3", "Max", "Peter Jones", StoreLocation::RockHill, "germanlonghair/n02101388_283.jpg"),
        dog("dog-4", "Daisy", "Susan White", StoreLocation::RockHill, "poodle-miniature/n02113712_393.jpg"),
    ]
}
