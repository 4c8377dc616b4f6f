use indexmap::IndexMap;

use super::NormalizedName;
use super::operation::Operation;
use super::security::Authentication;
use crate::routing::RouteTable;

/// The model of one API document.
#[derive(Debug)]
pub struct Api {
    /// Root name for generated identifiers, from the reader configuration.
    pub name: NormalizedName,
    /// Where the document came from. Prefixes every schema identifier.
    pub location: String,
    pub paths: Vec<Path>,
    /// Security schemes declared by the document.
    pub authentication: Vec<Authentication>,
    /// Display name for every schema identifier the model mentions.
    pub names: IndexMap<String, NormalizedName>,
    /// Routing table over the path patterns. [`Path::id`] is the id this
    /// table assigned to the pattern.
    pub routes: RouteTable,
}

impl Api {
    /// All operations across all paths, in document order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.paths.iter().flat_map(|path| path.operations.iter())
    }

    /// Look a path up by its route id.
    pub fn path(&self, id: usize) -> Option<&Path> {
        self.paths.iter().find(|path| path.id == id)
    }
}

/// One path pattern and the operations bound to it.
#[derive(Debug, Clone)]
pub struct Path {
    /// Id the routing table assigned to this pattern. Unique per [`Api`].
    pub id: usize,
    /// The pattern as written in the document, e.g. `/pets/{petId}`.
    pub pattern: String,
    pub operations: Vec<Operation>,
}
