use thiserror::Error;

/// A status specifier that matches none of the recognized forms: a literal
/// three-digit code (`404`), a class wildcard (`4XX`), or `default`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid status kind {0:?}")]
pub struct InvalidStatusKind(pub String);

/// Errors from binding a document to a dialect and building its model.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// No registered dialect recognized the document node.
    #[error("no registered dialect recognizes this document")]
    UnrecognizedDialect,

    /// The dialect is recognized but has no model reader yet.
    #[error("dialect {0} is recognized but not implemented")]
    NotImplemented(&'static str),

    /// The node was recognized but does not deserialize as the dialect's
    /// document structure.
    #[error("malformed {dialect} document: {source}")]
    Malformed {
        dialect: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A `$ref` pointed at a component that is not in the document.
    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),

    #[error(transparent)]
    Status(#[from] InvalidStatusKind),

    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Errors from the routing table.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route template {template:?} conflicts with an existing route: {source}")]
    Conflict {
        template: String,
        #[source]
        source: matchit::InsertError,
    },

    #[error("saved route table does not parse: {0}")]
    Load(#[from] serde_json::Error),
}
