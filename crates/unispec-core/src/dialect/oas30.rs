//! OpenAPI 3.0 reader.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use super::oas::{self, Components, PathItem, SecurityRequirement};
use super::{Document, DocumentConfiguration, DocumentInit};
use crate::error::DocumentError;
use crate::model::Api;

pub const DIALECT: &str = "openapi-3.0";

/// Typed OpenAPI 3.0 root: just the surface the model consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct Root {
    pub openapi: String,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    pub components: Option<Components>,
    pub security: Option<Vec<SecurityRequirement>>,
}

/// Shape check: an `openapi: 3.0.*` version marker.
pub fn recognizes(node: &Value) -> bool {
    node.get("openapi")
        .and_then(Value::as_str)
        .is_some_and(|version| version.starts_with("3.0"))
}

pub fn construct(init: DocumentInit) -> Result<Document, DocumentError> {
    let DocumentInit {
        location,
        node,
        configuration,
    } = init;
    let root: Root = serde_json::from_value(node).map_err(|source| DocumentError::Malformed {
        dialect: DIALECT,
        source,
    })?;
    Ok(Document::Oas30(Oas30Document {
        location,
        configuration,
        root,
    }))
}

/// A bound OpenAPI 3.0 document.
#[derive(Debug)]
pub struct Oas30Document {
    location: String,
    configuration: DocumentConfiguration,
    root: Root,
}

impl Oas30Document {
    /// Build the canonical model.
    pub fn api_model(&self) -> Result<Api, DocumentError> {
        oas::build_api(oas::BuildInput {
            dialect: DIALECT,
            location: &self.location,
            configuration: &self.configuration,
            paths: &self.root.paths,
            components: self.root.components.as_ref(),
            document_security: self.root.security.as_deref(),
        })
    }

    /// The embedded schema nodes by identifier.
    pub fn schema_nodes(&self) -> Vec<(String, &Value)> {
        oas::collect_schema_nodes(&self.location, &self.root.paths, self.root.components.as_ref())
    }
}
