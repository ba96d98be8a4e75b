//! In-process entity store with the same contract as the Postgres one.

use super::EntityStore;
use crate::error::StoreError;
use crate::model::{EntityId, PersistedEntity, TransportEntity};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Table {
    last_id: EntityId,
    rows: BTreeMap<EntityId, PersistedEntity>,
}

/// Ids come from a counter and are never reused, even after delete.
#[derive(Default)]
pub struct InMemoryEntityStore {
    table: Mutex<Table>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row as-is, bypassing request validation. Advances the id counter past `record.id`.
    pub fn seed(&self, record: PersistedEntity) -> Result<(), StoreError> {
        let mut table = self.lock()?;
        table.last_id = table.last_id.max(record.id);
        table.rows.insert(record.id, record);
        Ok(())
    }

    pub fn row_count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.rows.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table>, StoreError> {
        self.table
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory table lock poisoned".into()))
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn create(&self, fields: &TransportEntity) -> Result<PersistedEntity, StoreError> {
        let mut table = self.lock()?;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Unavailable("id sequence exhausted".into()))?;
        table.last_id = id;
        let row = fields.clone().into_persisted(id);
        table.rows.insert(id, row.clone());
        tracing::info!(id, "entity created");
        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<PersistedEntity>, StoreError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<PersistedEntity, StoreError> {
        self.lock()?
            .rows
            .get(&id)
            .filter(|r| !r.is_logically_absent())
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, record: &PersistedEntity) -> Result<PersistedEntity, StoreError> {
        let mut table = self.lock()?;
        let row = table.rows.get_mut(&record.id).ok_or(StoreError::NotFound(record.id))?;
        row.overlay(&record.fields());
        Ok(row.clone())
    }

    async fn delete(&self, id: EntityId) -> Result<PersistedEntity, StoreError> {
        let row = self.lock()?.rows.remove(&id).ok_or(StoreError::NotFound(id))?;
        tracing::info!(id, "entity deleted");
        Ok(row)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }
}
