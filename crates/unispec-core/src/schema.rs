//! Example extraction from raw schema nodes.
//!
//! The model never interprets schemas; this module reads just enough of
//! them to find directly stated example values. The resulting identifier
//! set is what mockability analysis and mock emitters run on.

use indexmap::IndexMap;
use serde_json::Value;

/// Scan schema nodes for stated examples, keyed by schema identifier.
/// Nodes without one are left out.
pub fn collect_examples<'n>(
    nodes: impl IntoIterator<Item = (String, &'n Value)>,
) -> IndexMap<String, Value> {
    let mut examples = IndexMap::new();
    for (schema_id, node) in nodes {
        if let Some(example) = stated_example(node) {
            examples.insert(schema_id, example.clone());
        }
    }
    examples
}

/// The example value a schema node states outright, if any. Looks at
/// `example`, the first of 3.1 `examples`, `default`, `const` and the
/// first `enum` entry, in that order. Nothing is synthesized from type
/// information.
pub fn stated_example(node: &Value) -> Option<&Value> {
    let object = node.as_object()?;
    if let Some(example) = object.get("example") {
        return Some(example);
    }
    if let Some(Value::Array(examples)) = object.get("examples") {
        if let Some(first) = examples.first() {
            return Some(first);
        }
    }
    if let Some(default) = object.get("default") {
        return Some(default);
    }
    if let Some(constant) = object.get("const") {
        return Some(constant);
    }
    if let Some(Value::Array(variants)) = object.get("enum") {
        if let Some(first) = variants.first() {
            return Some(first);
        }
    }
    None
}
