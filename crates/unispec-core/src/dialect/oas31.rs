//! OpenAPI 3.1 reader.
//!
//! Shares the build core with the 3.0 reader. The 3.1 additions the model
//! does not carry (webhooks, `jsonSchemaDialect`) are accepted and
//! skipped with a log line, not rejected.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use super::oas::{self, Components, PathItem, SecurityRequirement};
use super::{Document, DocumentConfiguration, DocumentInit};
use crate::error::DocumentError;
use crate::model::Api;

pub const DIALECT: &str = "openapi-3.1";

/// Typed OpenAPI 3.1 root: just the surface the model consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct Root {
    pub openapi: String,
    #[serde(rename = "jsonSchemaDialect")]
    pub json_schema_dialect: Option<String>,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    #[serde(default)]
    pub webhooks: IndexMap<String, PathItem>,
    pub components: Option<Components>,
    pub security: Option<Vec<SecurityRequirement>>,
}

/// Shape check: an `openapi: 3.1.*` version marker.
pub fn recognizes(node: &Value) -> bool {
    node.get("openapi")
        .and_then(Value::as_str)
        .is_some_and(|version| version.starts_with("3.1"))
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
    Ok(Document::Oas31(Oas31Document {
        location,
        configuration,
        root,
    }))
}

/// A bound OpenAPI 3.1 document.
#[derive(Debug)]
pub struct Oas31Document {
    location: String,
    configuration: DocumentConfiguration,
    root: Root,
}

impl Oas31Document {
    /// Build the canonical model.
    pub fn api_model(&self) -> Result<Api, DocumentError> {
        if let Some(dialect) = &self.root.json_schema_dialect {
            log::debug!("{}: schema dialect {dialect} left to the schema tooling", self.location);
        }
        if !self.root.webhooks.is_empty() {
            log::debug!(
                "{}: skipping {} webhook entries, they are not part of the path model",
                self.location,
                self.root.webhooks.len(),
            );
        }
        oas::build_api(oas::BuildInput {
            dialect: DIALECT,
            location: &self.location,
            configuration: &self.configuration,
            paths: &self.root.paths,
            components: self.root.components.as_ref(),
            document_security: self.root.security.as_deref(),
        })
    }

    /// The embedded schema nodes by identifier. Webhook nodes are not
    /// part of the model and are not enumerated.
    pub fn schema_nodes(&self) -> Vec<(String, &Value)> {
        oas::collect_schema_nodes(&self.location, &self.root.paths, self.root.components.as_ref())
    }
}
