//! Mapping from model schema identifiers to TypeScript type text.
//!
//! The model keeps schemas opaque, so every named schema becomes an
//! opaque alias in `types.ts` and these helpers decide which alias (or
//! builtin) a given position refers to.

use serde_json::Value;
use unispec_core::mock::JSON_CONTENT_TYPE;
use unispec_core::model::{Api, Body};

/// TypeScript type for a schema identifier: the derived alias when the
/// model names it, `unknown` otherwise.
pub fn ts_type<'a>(api: &'a Api, schema_id: Option<&str>) -> &'a str {
    schema_id
        .and_then(|id| api.names.get(id))
        .map_or("unknown", |name| name.pascal_case.as_str())
}

/// TypeScript type of a parsed payload: JSON bodies map through the
/// alias table, everything else is read as text.
pub fn payload_type<'a>(api: &'a Api, body: &Body) -> &'a str {
    if body.content_type == JSON_CONTENT_TYPE {
        ts_type(api, body.schema_id.as_deref())
    } else {
        "string"
    }
}

/// The body alternative a client method sends or parses: JSON when
/// offered, the first alternative otherwise.
pub fn preferred_body(bodies: &[Body]) -> Option<&Body> {
    bodies
        .iter()
        .find(|body| body.content_type == JSON_CONTENT_TYPE)
        .or_else(|| bodies.first())
}

/// Render a JSON value as a TypeScript expression. JSON is a syntactic
/// subset of TypeScript, so serialization is the whole job.
pub fn ts_literal(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}
