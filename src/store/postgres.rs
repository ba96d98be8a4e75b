//! PostgreSQL entity store. Statements are built once from the table name.

use super::EntityStore;
use crate::error::StoreError;
use crate::model::{EntityId, PersistedEntity, TransportEntity};
use async_trait::async_trait;
use sqlx::PgPool;

/// Quote identifier for PostgreSQL.
pub(crate) fn quoted_ident(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

const COLUMNS: &str = "id, \"type\", name, description";

/// Parameterized statements for one entity table.
#[derive(Clone, Debug)]
pub struct EntitySql {
    pub insert: String,
    pub select_all: String,
    pub select_by_id: String,
    pub update: String,
    pub delete: String,
}

impl EntitySql {
    pub fn for_table(table: &str) -> Self {
        let t = quoted_ident(table);
        EntitySql {
            insert: format!(
                "INSERT INTO {} (\"type\", name, description) VALUES ($1, $2, $3) RETURNING {}",
                t, COLUMNS
            ),
            select_all: format!("SELECT {} FROM {}", COLUMNS, t),
            select_by_id: format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, t),
            update: format!(
                "UPDATE {} SET \"type\" = $2, name = $3, description = $4 WHERE id = $1 RETURNING {}",
                t, COLUMNS
            ),
            delete: format!("DELETE FROM {} WHERE id = $1 RETURNING {}", t, COLUMNS),
        }
    }
}

pub struct PgEntityStore {
    pool: PgPool,
    sql: EntitySql,
}

impl PgEntityStore {
    pub fn new(pool: PgPool, table: &str) -> Self {
        PgEntityStore {
            pool,
            sql: EntitySql::for_table(table),
        }
    }
}

#[async_trait]
impl EntityStore for PgEntityStore {
    async fn create(&self, fields: &TransportEntity) -> Result<PersistedEntity, StoreError> {
        tracing::debug!(sql = %self.sql.insert, "query");
        let row = sqlx::query_as::<_, PersistedEntity>(&self.sql.insert)
            .bind(&fields.kind)
            .bind(&fields.name)
            .bind(&fields.description)
            .fetch_one(&self.pool)
            .await?;
        tracing::info!(id = row.id, "entity created");
        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<PersistedEntity>, StoreError> {
        tracing::debug!(sql = %self.sql.select_all, "query");
        let rows = sqlx::query_as::<_, PersistedEntity>(&self.sql.select_all)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: EntityId) -> Result<PersistedEntity, StoreError> {
        tracing::debug!(sql = %self.sql.select_by_id, id, "query");
        let row = sqlx::query_as::<_, PersistedEntity>(&self.sql.select_by_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.filter(|r| !r.is_logically_absent())
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, record: &PersistedEntity) -> Result<PersistedEntity, StoreError> {
        tracing::debug!(sql = %self.sql.update, id = record.id, "query");
        let row = sqlx::query_as::<_, PersistedEntity>(&self.sql.update)
            .bind(record.id)
            .bind(&record.kind)
            .bind(&record.name)
            .bind(&record.description)
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or(StoreError::NotFound(record.id))
    }

    async fn delete(&self, id: EntityId) -> Result<PersistedEntity, StoreError> {
        tracing::debug!(sql = %self.sql.delete, id, "query");
        let row = sqlx::query_as::<_, PersistedEntity>(&self.sql.delete)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let row = row.ok_or(StoreError::NotFound(id))?;
        tracing::info!(id, "entity deleted");
        Ok(row)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
