//! Dialect detection and dispatch.
//!
//! A registry holds (recognizer, constructor) pairs in registration
//! order; the first recognizer that accepts a document node wins, so the
//! order itself is part of the contract. Recognition is a cheap shape
//! check on the raw node, never a full validation.

pub mod oas;
pub mod oas30;
pub mod oas31;
pub mod swagger2;

use serde_json::Value;

use crate::error::DocumentError;
use crate::model::Api;

/// Reader configuration beyond the document itself.
#[derive(Debug, Clone)]
pub struct DocumentConfiguration {
    /// Root name part for generated identifiers: the client class, and
    /// display names that would otherwise not start with a letter.
    pub root_name_part: String,
}

impl Default for DocumentConfiguration {
    fn default() -> Self {
        DocumentConfiguration {
            root_name_part: "Api".to_string(),
        }
    }
}

/// Everything a dialect constructor receives: where the document came
/// from, its parsed root node, and the reader configuration.
#[derive(Debug, Clone)]
pub struct DocumentInit {
    pub location: String,
    pub node: Value,
    pub configuration: DocumentConfiguration,
}

/// Shape check over a raw document node.
pub type Recognizer = fn(&Value) -> bool;

/// Builds a dialect's typed document from a node its recognizer accepted.
pub type Constructor = fn(DocumentInit) -> Result<Document, DocumentError>;

struct DialectEntry {
    name: &'static str,
    recognizes: Recognizer,
    construct: Constructor,
}

/// Ordered dialect table.
pub struct DialectRegistry {
    entries: Vec<DialectEntry>,
}

impl DialectRegistry {
    /// An empty table. Useful when embedding a custom dialect set.
    pub fn new() -> Self {
        DialectRegistry {
            entries: Vec::new(),
        }
    }

    /// The standard table: `swagger-2.0`, then `openapi-3.0`, then
    /// `openapi-3.1`. The standard recognizers are mutually exclusive,
    /// so this order only decides ties against additionally registered
    /// dialects.
    pub fn standard() -> Self {
        let mut registry = DialectRegistry::new();
        registry.register(swagger2::DIALECT, swagger2::recognizes, swagger2::construct);
        registry.register(oas30::DIALECT, oas30::recognizes, oas30::construct);
        registry.register(oas31::DIALECT, oas31::recognizes, oas31::construct);
        registry
    }

    /// Append a dialect to the table.
    pub fn register(&mut self, name: &'static str, recognizes: Recognizer, construct: Constructor) {
        self.entries.push(DialectEntry {
            name,
            recognizes,
            construct,
        });
    }

    /// Bind a document to the first dialect that recognizes its node.
    pub fn bind(&self, init: DocumentInit) -> Result<Document, DocumentError> {
        for entry in &self.entries {
            if (entry.recognizes)(&init.node) {
                log::debug!("{}: bound to dialect {}", init.location, entry.name);
                return (entry.construct)(init);
            }
        }
        Err(DocumentError::UnrecognizedDialect)
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        DialectRegistry::standard()
    }
}

/// A bound document, ready to produce the canonical model.
#[derive(Debug)]
pub enum Document {
    Swagger2(swagger2::Swagger2Document),
    Oas30(oas30::Oas30Document),
    Oas31(oas31::Oas31Document),
}

impl Document {
    /// The dialect that recognized this document.
    pub fn dialect(&self) -> &'static str {
        match self {
            Document::Swagger2(_) => swagger2::DIALECT,
            Document::Oas30(_) => oas30::DIALECT,
            Document::Oas31(_) => oas31::DIALECT,
        }
    }

    /// Build the canonical model. Fails fast: unresolvable references and
    /// invalid status specifiers surface here, not during emission.
    pub fn api_model(&self) -> Result<Api, DocumentError> {
        match self {
            Document::Swagger2(document) => document.api_model(),
            Document::Oas30(document) => document.api_model(),
            Document::Oas31(document) => document.api_model(),
        }
    }

    /// The embedded schema nodes by identifier, in the order the builder
    /// names them.
    pub fn schema_nodes(&self) -> Vec<(String, &Value)> {
        match self {
            Document::Swagger2(_) => Vec::new(),
            Document::Oas30(document) => document.schema_nodes(),
            Document::Oas31(document) => document.schema_nodes(),
        }
    }
}

/// Compose a schema identifier: document location, `#`, then the JSON
/// pointer to the node, segments escaped per pointer rules.
pub fn schema_pointer(location: &str, segments: &[&str]) -> String {
    let mut id = String::with_capacity(location.len() + 16);
    id.push_str(location);
    id.push('#');
    for segment in segments {
        id.push('/');
        for ch in segment.chars() {
            match ch {
                '~' => id.push_str("~0"),
                '/' => id.push_str("~1"),
                other => id.push(other),
            }
        }
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_segments_are_escaped() {
        assert_eq!(
            schema_pointer("pets.yaml", &["paths", "/pets/{petId}", "get"]),
            "pets.yaml#/paths/~1pets~1{petId}/get"
        );
        assert_eq!(schema_pointer("a.json", &["a~b"]), "a.json#/a~0b");
        assert_eq!(schema_pointer("a.json", &[]), "a.json#");
    }
}
