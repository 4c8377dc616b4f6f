//! The canonical, dialect-independent API model.
//!
//! Dialect readers build this once; everything downstream (emitters, the
//! CLI, analysis helpers) only reads it. Schema nodes themselves are not
//! part of the model, only their identifiers are.

mod api;
mod operation;
mod security;

pub use api::{Api, Path};
pub use operation::{Body, Method, Operation, OperationResult, Parameter};
pub use security::{ApiKeyLocation, Authentication, AuthenticationKind, AuthenticationRequirement};

use std::fmt;

/// A name carried in every casing an emitter might need.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName {
    /// The name as written in the source document.
    pub original: String,
    /// PascalCase, for type names.
    pub pascal_case: String,
    /// camelCase, for member names.
    pub camel_case: String,
    /// snake_case, for file names.
    pub snake_case: String,
    /// SCREAMING_SNAKE_CASE, for constants.
    pub screaming_snake: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
