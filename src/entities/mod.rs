pub mod entity_record;
pub mod entity_seed;

pub use entity_record::Entity as EntityRecord;
pub use entity_seed::Entity as EntitySeed;
