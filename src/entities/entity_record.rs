use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One stored record of any entity kind. `seq` doubles as the index order.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "entity_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub seq: i32,
    pub collection: String,
    pub record_id: String,
    pub body: Json,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
