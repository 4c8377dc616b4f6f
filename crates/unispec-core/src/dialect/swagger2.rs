//! Swagger 2.0: recognized so callers get a precise diagnostic instead of
//! "unknown document", but there is no model reader behind it.

use serde::Deserialize;
use serde_json::Value;

use super::{Document, DocumentInit};
use crate::error::DocumentError;
use crate::model::Api;

pub const DIALECT: &str = "swagger-2.0";

#[derive(Debug, Clone, Deserialize)]
pub struct Root {
    pub swagger: String,
}

/// Shape check: a `swagger: "2.0"` version marker.
pub fn recognizes(node: &Value) -> bool {
    node.get("swagger")
        .and_then(Value::as_str)
        .is_some_and(|version| version == "2.0")
}

pub fn construct(init: DocumentInit) -> Result<Document, DocumentError> {
    let DocumentInit { location, node, .. } = init;
    let root: Root = serde_json::from_value(node).map_err(|source| DocumentError::Malformed {
        dialect: DIALECT,
        source,
    })?;
    Ok(Document::Swagger2(Swagger2Document { location, root }))
}

/// A bound Swagger 2.0 document. Constructing it succeeds; asking it for
/// a model does not.
#[derive(Debug)]
pub struct Swagger2Document {
    location: String,
    root: Root,
}

impl Swagger2Document {
    pub fn api_model(&self) -> Result<Api, DocumentError> {
        log::debug!(
            "{}: swagger {} documents have no model reader",
            self.location,
            self.root.swagger,
        );
        Err(DocumentError::NotImplemented(DIALECT))
    }
}
