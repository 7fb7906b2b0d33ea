//! Redis layout:
//!
//! - `{entity}:{id}`: record JSON as a plain string
//! - `{index}`: list of ids in insertion order
//! - `{index}:seeded`: set once the seed step has run
//!
//! Create and seed are Lua scripts so each runs as one atomic command.

use redis::AsyncCommands;
use serde_json::Value;

use super::{Keyspace, StoreError};

const INSERT_SCRIPT: &str = r"
if redis.call('SET', KEYS[1], ARGV[2], 'NX') then
  redis.call('RPUSH', KEYS[2], ARGV[1])
  return 1
end
return 0
";

const SEED_SCRIPT: &str = r"
if not redis.call('SET', KEYS[2], '1', 'NX') then
  return 0
end
if redis.call('LLEN', KEYS[1]) > 0 then
  return 0
end
for i = 2, #ARGV, 2 do
  if redis.call('SET', ARGV[1] .. ARGV[i], ARGV[i + 1], 'NX') then
    redis.call('RPUSH', KEYS[1], ARGV[i])
  end
end
return 1
";

#[derive(Clone)]
pub struct RedisBackend {
    client: redis::Client,
}

impl RedisBackend {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    async fn conn(&self) -> Result<redis::aio::MultiplexedConnection, StoreError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }

    pub(super) async fn load_all(&self, ks: Keyspace) -> Result<Vec<Value>, StoreError> {
        let mut conn = self.conn().await?;
        let ids: Vec<String> = conn.lrange(ks.index, 0, -1).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| ks.record_key(id)).collect();
        let bodies: Vec<Option<String>> = conn.mget(&keys).await?;

        let mut records = Vec::with_capacity(bodies.len());
        for (id, body) in ids.iter().zip(bodies) {
            match body {
                Some(body) => records.push(serde_json::from_str(&body)?),
                None => tracing::warn!(entity = ks.entity, id = %id, "index entry without record"),
            }
        }
        Ok(records)
    }

    pub(super) async fn load(&self, ks: Keyspace, id: &str) -> Result<Option<Value>, StoreError> {
        let mut conn = self.conn().await?;
        let body: Option<String> = conn.get(ks.record_key(id)).await?;
        match body {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    pub(super) async fn contains(&self, ks: Keyspace, id: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn().await?;
        Ok(conn.exists(ks.record_key(id)).await?)
    }

    pub(super) async fn insert(&self, ks: Keyspace, id: &str, body: Value) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        let inserted: i64 = redis::Script::new(INSERT_SCRIPT)
            .key(ks.record_key(id))
            .key(ks.index)
            .arg(id)
            .arg(body.to_string())
            .invoke_async(&mut conn)
            .await?;

        if inserted == 0 {
            return Err(StoreError::Conflict {
                entity: ks.entity,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    pub(super) async fn replace(&self, ks: Keyspace, id: &str, body: Value) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        let reply: Option<String> = redis::cmd("SET")
            .arg(ks.record_key(id))
            .arg(body.to_string())
            .arg("XX")
            .query_async(&mut conn)
            .await?;

        match reply {
            Some(_) => Ok(()),
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
        let mut conn = self.conn().await?;
        let script = redis::Script::new(SEED_SCRIPT);
        let mut invocation = script.prepare_invoke();
        invocation
            .key(ks.index)
            .key(ks.seed_marker())
            .arg(format!("{}:", ks.entity));
        for (id, body) in records {
            invocation.arg(id).arg(body.to_string());
        }

        let seeded: i64 = invocation.invoke_async(&mut conn).await?;
        Ok(seeded == 1)
    }
}

/// These run against the server in `REDIS_URL` and return early when it is
/// unset. Each test works in its own freshly named keyspace.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{dog, Dog};
    use crate::store::{Backend, EntityConfig, IndexedCollection};
    use serde_json::json;

    fn backend() -> Option<RedisBackend> {
        let url = std::env::var("REDIS_URL").ok()?;
        Some(RedisBackend::new(redis::Client::open(url).unwrap()))
    }

    fn leak(name: String) -> &'static str {
        Box::leak(name.into_boxed_str())
    }

    fn keyspace() -> Keyspace {
        let tag = uuid::Uuid::new_v4().simple().to_string();
        Keyspace {
            entity: leak(format!("widget-{tag}")),
            index: leak(format!("widgets-{tag}")),
        }
    }

    #[tokio::test]
    async fn insert_then_list_in_order() {
        let Some(b) = backend() else { return };
        let ks = keyspace();
        b.insert(ks, "b", json!({"id": "b"})).await.unwrap();
        b.insert(ks, "a", json!({"id": "a"})).await.unwrap();

        let all = b.load_all(ks).await.unwrap();
        assert_eq!(all, vec![json!({"id": "b"}), json!({"id": "a"})]);
        assert!(b.contains(ks, "a").await.unwrap());
        assert!(!b.contains(ks, "c").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_insert_is_a_conflict() {
        let Some(b) = backend() else { return };
        let ks = keyspace();
        b.insert(ks, "a", json!({"v": 1})).await.unwrap();

        let err = b.insert(ks, "a", json!({"v": 2})).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
        assert_eq!(b.load(ks, "a").await.unwrap(), Some(json!({"v": 1})));
        assert_eq!(b.load_all(ks).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn replace_requires_an_existing_key() {
        let Some(b) = backend() else { return };
        let ks = keyspace();
        let err = b.replace(ks, "nope", json!({})).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(b.load(ks, "nope").await.unwrap(), None);

        b.insert(ks, "a", json!({"v": 1})).await.unwrap();
        b.replace(ks, "a", json!({"v": 2})).await.unwrap();
        assert_eq!(b.load(ks, "a").await.unwrap(), Some(json!({"v": 2})));
    }

    #[tokio::test]
    async fn seed_runs_once() {
        let Some(b) = backend() else { return };
        let ks = keyspace();
        let records = vec![
            ("s-1".to_string(), json!({"id": "s-1"})),
            ("s-2".to_string(), json!({"id": "s-2"})),
        ];

        assert!(b.seed(ks, records.clone()).await.unwrap());
        assert!(!b.seed(ks, records).await.unwrap());
        assert_eq!(
            b.load_all(ks).await.unwrap(),
            vec![json!({"id": "s-1"}), json!({"id": "s-2"})]
        );
    }

    #[tokio::test]
    async fn seed_skips_a_populated_index() {
        let Some(b) = backend() else { return };
        let ks = keyspace();
        b.insert(ks, "user", json!({"id": "user"})).await.unwrap();

        let records = vec![("s-1".to_string(), json!({"id": "s-1"}))];
        assert!(!b.seed(ks, records).await.unwrap());
        assert_eq!(b.load_all(ks).await.unwrap(), vec![json!({"id": "user"})]);
    }

    #[tokio::test]
    async fn concurrent_ensure_seed_writes_once() {
        let Some(b) = backend() else { return };
        let ks = keyspace();
        let config: &'static EntityConfig<Dog> = Box::leak(Box::new(EntityConfig {
            entity_name: ks.entity,
            index_name: ks.index,
            seed: dog::CONFIG.seed,
        }));
        let backend = Backend::Redis(b);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let dogs = IndexedCollection::new(config, backend.clone());
                tokio::spawn(async move { dogs.ensure_seed().await.unwrap() })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        let dogs = IndexedCollection::new(config, backend);
        assert_eq!(dogs.list().await.unwrap(), (dog::CONFIG.seed)());
    }
}
