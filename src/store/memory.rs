use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use super::{Keyspace, StoreError};

#[derive(Default)]
struct Collection {
    records: HashMap<String, Value>,
    index: Vec<String>,
    seeded: bool,
}

/// Process-local backend. Every operation runs inside one lock critical
/// section, which is what makes create and seed atomic here.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    collections: Arc<RwLock<HashMap<&'static str, Collection>>>,
}

impl MemoryBackend {
    pub(super) async fn load_all(&self, ks: Keyspace) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(ks.entity)
            .map(|c| {
                c.index
                    .iter()
                    .filter_map(|id| c.records.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    pub(super) async fn load(&self, ks: Keyspace, id: &str) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(ks.entity)
            .and_then(|c| c.records.get(id).cloned()))
    }

    pub(super) async fn contains(&self, ks: Keyspace, id: &str) -> Result<bool, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(ks.entity)
            .is_some_and(|c| c.records.contains_key(id)))
    }

    pub(super) async fn insert(&self, ks: Keyspace, id: &str, body: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let collection = collections.entry(ks.entity).or_default();
        if collection.records.contains_key(id) {
            return Err(StoreError::Conflict {
                entity: ks.entity,
                id: id.to_string(),
            });
        }
        collection.records.insert(id.to_string(), body);
        collection.index.push(id.to_string());
        Ok(())
    }

    pub(super) async fn replace(&self, ks: Keyspace, id: &str, body: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        match collections
            .get_mut(ks.entity)
            .and_then(|c| c.records.get_mut(id))
        {
            Some(slot) => {
                *slot = body;
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: ks.entity,
                id: id.to_string(),
            }),
        }
    }

    pub(super) async fn seed(
        &self,
        ks: Keyspace,
        records: Vec<(String, Value)>,
    ) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let collection = collections.entry(ks.entity).or_default();
        if collection.seeded {
            return Ok(false);
        }
        collection.seeded = true;
        if !collection.index.is_empty() {
            return Ok(false);
        }

        for (id, body) in records {
            if collection.records.contains_key(&id) {
                continue;
            }
            collection.index.push(id.clone());
            collection.records.insert(id, body);
        }
        Ok(true)
    }
}
