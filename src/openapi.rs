//! OpenAPI description of the HTTP surface, served at `/openapi.json`.

use crate::error::ErrorBody;
use crate::model::{PersistedEntity, TransportEntity};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::common::hello,
        crate::handlers::entity::create,
        crate::handlers::entity::list,
        crate::handlers::entity::read,
        crate::handlers::entity::update,
        crate::handlers::entity::delete
    ),
    components(schemas(TransportEntity, PersistedEntity, ErrorBody)),
    tags((name = "entities", description = "Entity CRUD"))
)]
pub struct ApiDoc;
