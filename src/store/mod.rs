//! Indexed entity store.
//!
//! Each entity kind is described by a static [`EntityConfig`] and accessed
//! through one generic [`IndexedCollection`]. Records are kept as JSON keyed
//! by id, next to an ordered index of ids that drives listing. Creation writes
//! the record and its index entry together, so the index never holds an id
//! without a record and a record never exists outside the index.

pub mod memory;
pub mod redis_kv;
pub mod sql;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryBackend;
pub use redis_kv::RedisBackend;
pub use sql::SqlBackend;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} {id} already exists")]
    Conflict { entity: &'static str, id: String },

    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// A JSON-serializable record with a string id.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Called with the current time whenever the record is rewritten.
    fn touch(&mut self, _now: DateTime<Utc>) {}
}

/// Static description of one entity kind.
pub struct EntityConfig<T: 'static> {
    /// Prefix of every record key.
    pub entity_name: &'static str,
    /// Name of the ordered id list.
    pub index_name: &'static str,
    /// Demonstration records written the first time the index is found empty.
    pub seed: fn() -> Vec<T>,
}

impl<T> EntityConfig<T> {
    pub fn keyspace(&self) -> Keyspace {
        Keyspace {
            entity: self.entity_name,
            index: self.index_name,
        }
    }
}

/// Names a backend needs to address one entity kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keyspace {
    pub entity: &'static str,
    pub index: &'static str,
}

impl Keyspace {
    pub fn record_key(&self, id: &str) -> String {
        format!("{}:{}", self.entity, id)
    }

    pub fn seed_marker(&self) -> String {
        format!("{}:seeded", self.index)
    }
}

/// Storage the collections run on.
#[derive(Clone)]
pub enum Backend {
    Memory(MemoryBackend),
    Redis(RedisBackend),
    Sql(SqlBackend),
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Memory(_) => "memory",
            Backend::Redis(_) => "redis",
            Backend::Sql(_) => "sql",
        }
    }

    async fn load_all(&self, ks: Keyspace) -> Result<Vec<Value>, StoreError> {
        match self {
            Backend::Memory(b) => b.load_all(ks).await,
            Backend::Redis(b) => b.load_all(ks).await,
            Backend::Sql(b) => b.load_all(ks).await,
        }
    }

    async fn load(&self, ks: Keyspace, id: &str) -> Result<Option<Value>, StoreError> {
        match self {
            Backend::Memory(b) => b.load(ks, id).await,
            Backend::Redis(b) => b.load(ks, id).await,
            Backend::Sql(b) => b.load(ks, id).await,
        }
    }

    async fn contains(&self, ks: Keyspace, id: &str) -> Result<bool, StoreError> {
        match self {
            Backend::Memory(b) => b.contains(ks, id).await,
            Backend::Redis(b) => b.contains(ks, id).await,
            Backend::Sql(b) => b.contains(ks, id).await,
        }
    }

    async fn insert(&self, ks: Keyspace, id: &str, body: Value) -> Result<(), StoreError> {
        match self {
            Backend::Memory(b) => b.insert(ks, id, body).await,
            Backend::Redis(b) => b.insert(ks, id, body).await,
            Backend::Sql(b) => b.insert(ks, id, body).await,
        }
    }

    async fn replace(&self, ks: Keyspace, id: &str, body: Value) -> Result<(), StoreError> {
        match self {
            Backend::Memory(b) => b.replace(ks, id, body).await,
            Backend::Redis(b) => b.replace(ks, id, body).await,
            Backend::Sql(b) => b.replace(ks, id, body).await,
        }
    }

    async fn seed(&self, ks: Keyspace, records: Vec<(String, Value)>) -> Result<bool, StoreError> {
        match self {
            Backend::Memory(b) => b.seed(ks, records).await,
            Backend::Redis(b) => b.seed(ks, records).await,
            Backend::Sql(b) => b.seed(ks, records).await,
        }
    }
}

/// All records of one entity kind, in index order.
#[derive(Clone)]
pub struct IndexedCollection<T: 'static> {
    config: &'static EntityConfig<T>,
    backend: Backend,
    seeded: Arc<AtomicBool>,
}

impl<T: Record> IndexedCollection<T> {
    pub fn new(config: &'static EntityConfig<T>, backend: Backend) -> Self {
        Self {
            config,
            backend,
            seeded: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn entity_name(&self) -> &'static str {
        self.config.entity_name
    }

    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        self.backend
            .load_all(self.config.keyspace())
            .await?
            .into_iter()
            .map(|body| serde_json::from_value(body).map_err(StoreError::from))
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        match self.backend.load(self.config.keyspace(), id).await? {
            Some(body) => Ok(Some(serde_json::from_value(body)?)),
            None => Ok(None),
        }
    }

    pub async fn exists(&self, id: &str) -> Result<bool, StoreError> {
        self.backend.contains(self.config.keyspace(), id).await
    }

    /// Stores a new record, assigning a UUID when it has no id yet.
    ///
    /// An id that is already taken is rejected with [`StoreError::Conflict`];
    /// existing records are never overwritten by `create`.
    pub async fn create(&self, mut record: T) -> Result<T, StoreError> {
        if record.id().is_empty() {
            record.set_id(Uuid::new_v4().to_string());
        }
        let body = serde_json::to_value(&record)?;
        self.backend
            .insert(self.config.keyspace(), record.id(), body)
            .await?;

        tracing::debug!(entity = self.config.entity_name, id = record.id(), "record created");
        Ok(record)
    }

    /// Read-modify-write of one record. The id survives whatever `update` does.
    pub async fn mutate<F>(&self, id: &str, update: F) -> Result<T, StoreError>
    where
        F: FnOnce(T) -> T,
    {
        let ks = self.config.keyspace();
        let current: T = match self.backend.load(ks, id).await? {
            Some(body) => serde_json::from_value(body)?,
            None => {
                return Err(StoreError::NotFound {
                    entity: self.config.entity_name,
                    id: id.to_string(),
                })
            }
        };

        let mut next = update(current);
        next.set_id(id.to_string());
        next.touch(Utc::now());

        self.backend
            .replace(ks, id, serde_json::to_value(&next)?)
            .await?;

        tracing::debug!(entity = self.config.entity_name, id, "record mutated");
        Ok(next)
    }

    /// Writes the seed records if this store has never been seeded and the
    /// index is empty. Returns whether this call did the seeding.
    ///
    /// The backend performs the check and the writes as one atomic step.
    pub async fn ensure_seed(&self) -> Result<bool, StoreError> {
        if self.seeded.load(Ordering::Acquire) {
            return Ok(false);
        }

        let records = (self.config.seed)()
            .into_iter()
            .map(|record| {
                let body = serde_json::to_value(&record)?;
                Ok((record.id().to_string(), body))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        let seeded = if records.is_empty() {
            false
        } else {
            self.backend.seed(self.config.keyspace(), records).await?
        };

        self.seeded.store(true, Ordering::Release);
        if seeded {
            tracing::info!(entity = self.config.entity_name, "seeded demonstration records");
        }
        Ok(seeded)
    }
}
