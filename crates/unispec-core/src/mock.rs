//! Mockability analysis.
//!
//! An operation is mockable when a mock request and response can be
//! synthesized for it from example values alone. Callers supply the set
//! of schema identifiers they can produce an example for (see
//! [`crate::schema::collect_examples`]).

use std::collections::BTreeSet;

use crate::model::{Body, Operation, OperationResult, Parameter};

/// The only content type mock bodies can be synthesized for.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A parameter is mockable when it is untyped, when an example exists for
/// its schema, or when leaving it out is itself valid.
pub fn is_parameter_mockable(parameter: &Parameter, mockable_schemas: &BTreeSet<String>) -> bool {
    match &parameter.schema_id {
        None => true,
        Some(schema_id) => mockable_schemas.contains(schema_id) || !parameter.required,
    }
}

/// A body is mockable only as JSON; any other content type is out
/// regardless of its schema.
pub fn is_body_mockable(body: &Body, mockable_schemas: &BTreeSet<String>) -> bool {
    body.content_type == JSON_CONTENT_TYPE
        && body
            .schema_id
            .as_ref()
            .is_none_or(|schema_id| mockable_schemas.contains(schema_id))
}

/// Every header must be mockable; of the bodies, one usable alternative
/// suffices (none at all is also fine).
pub fn is_operation_result_mockable(
    result: &OperationResult,
    mockable_schemas: &BTreeSet<String>,
) -> bool {
    result
        .header_parameters
        .iter()
        .all(|parameter| is_parameter_mockable(parameter, mockable_schemas))
        && (result.bodies.is_empty()
            || result
                .bodies
                .iter()
                .any(|body| is_body_mockable(body, mockable_schemas)))
}

/// An operation is mockable when every parameter is satisfiable and, for
/// bodies and results, at least one alternative is usable.
pub fn is_operation_mockable(operation: &Operation, mockable_schemas: &BTreeSet<String>) -> bool {
    operation
        .parameters()
        .all(|parameter| is_parameter_mockable(parameter, mockable_schemas))
        && (operation.bodies.is_empty()
            || operation
                .bodies
                .iter()
                .any(|body| is_body_mockable(body, mockable_schemas)))
        && (operation.results.is_empty()
            || operation
                .results
                .iter()
                .any(|result| is_operation_result_mockable(result, mockable_schemas)))
}
