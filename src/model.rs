//! Entity representations: what clients send, and what the table stores.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Store-assigned identifier (`SERIAL` column).
pub type EntityId = i32;

/// Client-facing shape. Never carries an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransportEntity {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub description: String,
}

/// Row shape of the entity table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PersistedEntity {
    pub id: EntityId,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub name: String,
    pub description: String,
}

impl TransportEntity {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        TransportEntity {
            kind: kind.into(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Attach a store-assigned id.
    pub fn into_persisted(self, id: EntityId) -> PersistedEntity {
        PersistedEntity {
            id,
            kind: self.kind,
            name: self.name,
            description: self.description,
        }
    }
}

impl PersistedEntity {
    /// Overwrite the mutable fields; `id` is kept.
    pub fn overlay(&mut self, fields: &TransportEntity) {
        self.kind.clone_from(&fields.kind);
        self.name.clone_from(&fields.name);
        self.description.clone_from(&fields.description);
    }

    /// Records with an empty description are treated as if they did not exist.
    pub fn is_logically_absent(&self) -> bool {
        self.description.is_empty()
    }

    pub fn fields(&self) -> TransportEntity {
        TransportEntity {
            kind: self.kind.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}
