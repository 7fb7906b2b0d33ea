use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use serde_json::Value;

use super::{Keyspace, StoreError};
use crate::entities::{entity_record, entity_seed, EntityRecord, EntitySeed};

/// SeaORM backend. All kinds share `entity_records`, partitioned by the
/// `collection` column; the auto-increment `seq` gives insertion order.
#[derive(Clone)]
pub struct SqlBackend {
    db: DatabaseConnection,
}

impl SqlBackend {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub(super) async fn load_all(&self, ks: Keyspace) -> Result<Vec<Value>, StoreError> {
        let rows = EntityRecord::find()
            .filter(entity_record::Column::Collection.eq(ks.entity))
            .order_by_asc(entity_record::Column::Seq)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|row| row.body).collect())
    }

    pub(super) async fn load(&self, ks: Keyspace, id: &str) -> Result<Option<Value>, StoreError> {
        let row = EntityRecord::find()
            .filter(entity_record::Column::Collection.eq(ks.entity))
            .filter(entity_record::Column::RecordId.eq(id))
            .one(&self.db)
            .await?;
        Ok(row.map(|row| row.body))
    }

    pub(super) async fn contains(&self, ks: Keyspace, id: &str) -> Result<bool, StoreError> {
        let count = EntityRecord::find()
            .filter(entity_record::Column::Collection.eq(ks.entity))
            .filter(entity_record::Column::RecordId.eq(id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    pub(super) async fn insert(&self, ks: Keyspace, id: &str, body: Value) -> Result<(), StoreError> {
        let conflict = || StoreError::Conflict {
            entity: ks.entity,
            id: id.to_string(),
        };

        let row = entity_record::ActiveModel {
            collection: Set(ks.entity.to_string()),
            record_id: Set(id.to_string()),
            body: Set(body),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match row.insert(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(conflict())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub(super) async fn replace(&self, ks: Keyspace, id: &str, body: Value) -> Result<(), StoreError> {
        let result = EntityRecord::update_many()
            .col_expr(entity_record::Column::Body, Expr::value(body))
            .filter(entity_record::Column::Collection.eq(ks.entity))
            .filter(entity_record::Column::RecordId.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound {
                entity: ks.entity,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// The seed marker insert is conflict-ignoring, so only the transaction
    /// that actually adds the marker row goes on to write records.
    pub(super) async fn seed(
        &self,
        ks: Keyspace,
        records: Vec<(String, Value)>,
    ) -> Result<bool, StoreError> {
        let txn = self.db.begin().await?;

        let marker = entity_seed::ActiveModel {
            collection: Set(ks.entity.to_string()),
            seeded_at: Set(Utc::now()),
        };
        let claimed = EntitySeed::insert(marker)
            .on_conflict(
                OnConflict::column(entity_seed::Column::Collection)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await;
        match claimed {
            Ok(0) | Err(DbErr::RecordNotInserted) => {
                txn.rollback().await?;
                return Ok(false);
            }
            Ok(_) => {}
            Err(e) => return Err(e.into()),
        }

        let existing = EntityRecord::find()
            .filter(entity_record::Column::Collection.eq(ks.entity))
            .count(&txn)
            .await?;
        if existing > 0 {
            txn.commit().await?;
            return Ok(false);
        }

        let now = Utc::now();
        let rows = records.into_iter().map(|(id, body)| entity_record::ActiveModel {
            collection: Set(ks.entity.to_string()),
            record_id: Set(id),
            body: Set(body),
            created_at: Set(now),
            ..Default::default()
        });
        EntityRecord::insert_many(rows).exec(&txn).await?;

        txn.commit().await?;
        Ok(true)
    }
}
