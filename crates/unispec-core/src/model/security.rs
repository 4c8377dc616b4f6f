/// A security scheme declared by the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authentication {
    /// The scheme's declaration name; requirement items refer to this.
    pub name: String,
    pub kind: AuthenticationKind,
}

/// The scheme kinds the model carries. Schemes outside this set are
/// dropped by the readers with a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationKind {
    /// An API key sent in a named parameter.
    ApiKey {
        parameter_name: String,
        location: ApiKeyLocation,
    },
    /// HTTP `Basic` authorization.
    HttpBasic,
    /// HTTP `Bearer` authorization.
    HttpBearer,
}

/// Where an API key parameter travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyLocation {
    Query,
    Header,
    Cookie,
}

impl ApiKeyLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKeyLocation::Query => "query",
            ApiKeyLocation::Header => "header",
            ApiKeyLocation::Cookie => "cookie",
        }
    }
}

/// One AND-item inside an OR-group: the named scheme must be satisfied
/// with (at least) the listed scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationRequirement {
    pub authentication_name: String,
    pub scopes: Vec<String>,
}
