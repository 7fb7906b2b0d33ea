use sea_orm::Database;
use sea_orm_migration::MigratorTrait;

use crate::{
    config::{Config, StorageKind},
    migrator::Migrator,
    model::{dog, engagement, meet_and_greet, observation, shift_report, staff},
    model::{Dog, Engagement, MeetAndGreet, Observation, ShiftReport, Staff},
    store::{Backend, IndexedCollection, MemoryBackend, RedisBackend, SqlBackend, StoreError},
};

/// One collection per entity kind, all on the same backend. Shared with
/// handlers as an `Extension`.
#[derive(Clone)]
pub struct Collections {
    pub staff: IndexedCollection<Staff>,
    pub dogs: IndexedCollection<Dog>,
    pub meet_and_greets: IndexedCollection<MeetAndGreet>,
    pub engagements: IndexedCollection<Engagement>,
    pub observations: IndexedCollection<Observation>,
    pub shift_reports: IndexedCollection<ShiftReport>,
}

impl Collections {
    pub fn new(backend: Backend) -> Self {
        Self {
            staff: IndexedCollection::new(&staff::CONFIG, backend.clone()),
            dogs: IndexedCollection::new(&dog::CONFIG, backend.clone()),
            meet_and_greets: IndexedCollection::new(&meet_and_greet::CONFIG, backend.clone()),
            engagements: IndexedCollection::new(&engagement::CONFIG, backend.clone()),
            observations: IndexedCollection::new(&observation::CONFIG, backend.clone()),
            shift_reports: IndexedCollection::new(&shift_report::CONFIG, backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Backend::Memory(MemoryBackend::default()))
    }

    /// Seeds the reference and demo collections.
    pub async fn ensure_seed(&self) -> Result<(), StoreError> {
        let (staff, greets, dogs) = futures::try_join!(
            self.staff.ensure_seed(),
            self.meet_and_greets.ensure_seed(),
            self.dogs.ensure_seed(),
        )?;
        if staff {
            crate::metrics::record_seeded(self.staff.entity_name());
        }
        if greets {
            crate::metrics::record_seeded(self.meet_and_greets.entity_name());
        }
        if dogs {
            crate::metrics::record_seeded(self.dogs.entity_name());
        }
        Ok(())
    }
}

/// Opens the configured backend, running migrations for SQL storage.
pub async fn connect_backend(config: &Config) -> Result<Backend, StoreError> {
    match config.storage {
        StorageKind::Memory => Ok(Backend::Memory(MemoryBackend::default())),
        StorageKind::Redis => {
            let client = redis::Client::open(config.redis_url.as_str())?;
            Ok(Backend::Redis(RedisBackend::new(client)))
        }
        StorageKind::Sql => {
            let url = config.database_url.as_deref().unwrap_or_default();
            let db = Database::connect(url).await?;
            Migrator::up(&db, None).await?;
            Ok(Backend::Sql(SqlBackend::new(db)))
        }
    }
}
