//! Entity service: REST CRUD over a single Postgres-backed entity table.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod routes;
pub mod schema;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServiceConfig, StoreBackend};
pub use error::{AppError, ConfigError, ErrorKey, StoreError, StoreErrorKind, ValidationError};
pub use model::{EntityId, PersistedEntity, TransportEntity};
pub use routes::{app, common_routes, entity_routes};
pub use schema::{ensure_database_exists, ensure_entity_table};
pub use service::RequestValidator;
pub use state::AppState;
pub use store::{connect_store, EntityStore, InMemoryEntityStore, PgEntityStore};
