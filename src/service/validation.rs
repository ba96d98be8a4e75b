//! Request body validation: raw bytes to a typed entity, or a `ValidationError`.

use crate::error::ValidationError;
use crate::model::{EntityId, PersistedEntity, TransportEntity};
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Create body: `type`, `name`, `description`. Any `id` is ignored.
    pub fn transport_entity(body: &[u8]) -> Result<TransportEntity, ValidationError> {
        let obj = parse_object(body)?;
        fields(&obj)
    }

    /// Update body: like create, plus a positive integer `id`.
    pub fn persisted_entity(body: &[u8]) -> Result<PersistedEntity, ValidationError> {
        let obj = parse_object(body)?;
        let id = match lookup(&obj, "id") {
            None | Some(Value::Null) => return Err(ValidationError::Missing("id")),
            Some(v) => v
                .as_i64()
                .filter(|n| *n > 0)
                .and_then(|n| EntityId::try_from(n).ok())
                .ok_or(ValidationError::InvalidId)?,
        };
        Ok(fields(&obj)?.into_persisted(id))
    }
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(ValidationError::NotAnObject),
    }
}

fn fields(obj: &Map<String, Value>) -> Result<TransportEntity, ValidationError> {
    Ok(TransportEntity {
        kind: required_text(obj, "type")?,
        name: required_text(obj, "name")?,
        description: required_text(obj, "description")?,
    })
}

/// Exact key first, then a case-insensitive match (`Type`, `ID`, ...).
fn lookup<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    obj.get(field).or_else(|| {
        obj.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(field))
            .map(|(_, v)| v)
    })
}

fn required_text(obj: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    match lookup(obj, field) {
        None | Some(Value::Null) => Err(ValidationError::Missing(field)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(ValidationError::Blank(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::NotAString(field)),
    }
}
