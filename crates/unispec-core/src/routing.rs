//! Routing table over path templates.
//!
//! Template syntax is the document's own (`/pets/{petId}`); matching is
//! delegated to the external matcher. The table round-trips through an
//! opaque saved form, and ids stay stable across a save and load.

use std::fmt;

use crate::error::RouteError;

pub struct RouteTable {
    router: matchit::Router<usize>,
    templates: Vec<String>,
}

impl RouteTable {
    pub fn new() -> Self {
        RouteTable {
            router: matchit::Router::new(),
            templates: Vec::new(),
        }
    }

    /// Register a template. The returned id is dense, starts at zero and
    /// survives a save/load round trip.
    pub fn add_route(&mut self, template: &str) -> Result<usize, RouteError> {
        let id = self.templates.len();
        self.router
            .insert(template, id)
            .map_err(|source| RouteError::Conflict {
                template: template.to_string(),
                source,
            })?;
        self.templates.push(template.to_string());
        Ok(id)
    }

    /// Match a concrete request path against the registered templates.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        let hit = self.router.at(path).ok()?;
        Some(RouteMatch {
            id: *hit.value,
            parameters: hit
                .params
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        })
    }

    /// The template a given id was registered with.
    pub fn template(&self, id: usize) -> Option<&str> {
        self.templates.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Serialize to the opaque saved form.
    pub fn save(&self) -> String {
        serde_json::to_string(&self.templates).expect("string lists serialize")
    }

    /// Rebuild a table from its saved form. Ids come out as they went in.
    pub fn load(saved: &str) -> Result<Self, RouteError> {
        let templates: Vec<String> = serde_json::from_str(saved)?;
        let mut table = RouteTable::new();
        for template in &templates {
            table.add_route(template)?;
        }
        Ok(table)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        RouteTable::new()
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("templates", &self.templates)
            .finish_non_exhaustive()
    }
}

/// A successful lookup: the id [`RouteTable::add_route`] handed out, plus
/// the captured template parameters in path order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub id: usize,
    pub parameters: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_and_matchable() {
        let mut table = RouteTable::new();
        let pets = table.add_route("/pets").unwrap();
        let pet = table.add_route("/pets/{petId}").unwrap();
        assert_eq!((pets, pet), (0, 1));

        let hit = table.match_path("/pets/42").unwrap();
        assert_eq!(hit.id, pet);
        assert_eq!(hit.parameters, vec![("petId".to_string(), "42".to_string())]);
        assert_eq!(table.match_path("/pets").map(|hit| hit.id), Some(pets));
        assert!(table.match_path("/owners").is_none());
    }

    #[test]
    fn static_segments_beat_captures() {
        let mut table = RouteTable::new();
        let by_id = table.add_route("/pets/{petId}").unwrap();
        let mine = table.add_route("/pets/mine").unwrap();
        assert_eq!(table.match_path("/pets/mine").map(|hit| hit.id), Some(mine));
        assert_eq!(table.match_path("/pets/7").map(|hit| hit.id), Some(by_id));
    }

    #[test]
    fn conflicting_templates_are_rejected() {
        let mut table = RouteTable::new();
        table.add_route("/pets/{petId}").unwrap();
        let error = table.add_route("/pets/{id}").unwrap_err();
        assert!(matches!(error, RouteError::Conflict { .. }));
        // The failed insert must not burn an id.
        assert_eq!(table.add_route("/owners").unwrap(), 1);
    }

    #[test]
    fn save_and_load_preserve_ids() {
        let mut table = RouteTable::new();
        table.add_route("/pets").unwrap();
        table.add_route("/pets/{petId}").unwrap();
        let restored = RouteTable::load(&table.save()).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.match_path("/pets/9").map(|hit| hit.id), Some(1));
        assert_eq!(restored.template(1), Some("/pets/{petId}"));
    }

    #[test]
    fn garbage_does_not_load() {
        assert!(matches!(RouteTable::load("not json"), Err(RouteError::Load(_))));
    }
}
