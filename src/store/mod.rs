//! Entity store gateway: the only code that touches durable storage.

mod memory;
mod postgres;

pub use memory::InMemoryEntityStore;
pub use postgres::{EntitySql, PgEntityStore};
pub(crate) use postgres::quoted_ident;

use crate::config::{ServiceConfig, StoreBackend};
use crate::error::StoreError;
use crate::model::{EntityId, PersistedEntity, TransportEntity};
use async_trait::async_trait;
use std::sync::Arc;

/// Single-record operations over the entity table. One call is one store round trip.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Insert a new row; the store assigns the id.
    async fn create(&self, fields: &TransportEntity) -> Result<PersistedEntity, StoreError>;

    /// Every row, in store-native order.
    async fn list_all(&self) -> Result<Vec<PersistedEntity>, StoreError>;

    /// `NotFound` when no row matches or the row has an empty description.
    async fn find_by_id(&self, id: EntityId) -> Result<PersistedEntity, StoreError>;

    /// Overwrite type, name and description of the row `record.id`. `NotFound` when it does not exist.
    async fn update(&self, record: &PersistedEntity) -> Result<PersistedEntity, StoreError>;

    /// Remove the row and return its last values. `NotFound` when it does not exist.
    async fn delete(&self, id: EntityId) -> Result<PersistedEntity, StoreError>;

    /// Readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Build the configured store. For Postgres this creates the database and table when missing.
pub async fn connect_store(config: &ServiceConfig) -> Result<Arc<dyn EntityStore>, StoreError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("using in-memory entity store");
            Ok(Arc::new(InMemoryEntityStore::new()))
        }
        StoreBackend::Postgres => {
            crate::schema::ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            tracing::info!("connected to postgres");
            crate::schema::ensure_entity_table(&pool, &config.entity_table).await?;
            tracing::info!(table = %config.entity_table, "entity table ready");
            Ok(Arc::new(PgEntityStore::new(pool, &config.entity_table)))
        }
    }
}
