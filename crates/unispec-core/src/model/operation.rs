use super::NormalizedName;
use super::security::AuthenticationRequirement;

/// HTTP methods an operation can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl Method {
    /// Uppercase wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Head => "HEAD",
            Method::Patch => "PATCH",
            Method::Trace => "TRACE",
        }
    }
}

/// One HTTP method on one path.
#[derive(Debug, Clone)]
pub struct Operation {
    pub name: NormalizedName,
    pub method: Method,
    pub deprecated: bool,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub query_parameters: Vec<Parameter>,
    pub header_parameters: Vec<Parameter>,
    pub path_parameters: Vec<Parameter>,
    pub cookie_parameters: Vec<Parameter>,
    /// Request body alternatives, one per content type.
    pub bodies: Vec<Body>,
    /// Response shapes, most specific status specifier first.
    pub results: Vec<OperationResult>,
    /// OR-groups of AND-items. Empty means the operation is open.
    pub authentication_requirements: Vec<Vec<AuthenticationRequirement>>,
}

impl Operation {
    /// All parameters across the four locations.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.query_parameters
            .iter()
            .chain(&self.header_parameters)
            .chain(&self.path_parameters)
            .chain(&self.cookie_parameters)
    }
}

/// One response shape, keyed by the status specifier that declared it.
#[derive(Debug, Clone)]
pub struct OperationResult {
    /// The specifier as written: `404`, `4XX` or `default`.
    pub status_kind: String,
    /// Concrete codes this result claimed from the operation's pool.
    pub status_codes: Vec<u16>,
    pub header_parameters: Vec<Parameter>,
    /// Response body alternatives, one per content type.
    pub bodies: Vec<Body>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub required: bool,
    /// Identifier of the parameter's schema node. Absent means untyped.
    pub schema_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    pub content_type: String,
    /// Identifier of the body's schema node. Absent means untyped.
    pub schema_id: Option<String>,
}
