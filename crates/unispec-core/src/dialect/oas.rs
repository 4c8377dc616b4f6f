//! Typed document structures and the model-build core shared by the
//! OpenAPI 3.0 and 3.1 readers.
//!
//! Only the surface the canonical model consumes is typed. Schema nodes
//! stay raw [`serde_json::Value`]s; the model records their identifiers
//! and leaves interpretation to the schema tooling downstream.

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use serde_json::Value;

use super::{DocumentConfiguration, schema_pointer};
use crate::error::DocumentError;
use crate::model::{
    Api, ApiKeyLocation, Authentication, AuthenticationKind, AuthenticationRequirement, Body,
    Method, Operation, OperationResult, Parameter, Path,
};
use crate::naming::{derive_schema_names, normalize_name, route_to_name};
use crate::routing::RouteTable;
use crate::status::{status_kind_comparer, take_status_codes};

/// A path item: shared parameters plus one operation per method.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,
    pub get: Option<OperationObject>,
    pub put: Option<OperationObject>,
    pub post: Option<OperationObject>,
    pub delete: Option<OperationObject>,
    pub options: Option<OperationObject>,
    pub head: Option<OperationObject>,
    pub patch: Option<OperationObject>,
    pub trace: Option<OperationObject>,
}

impl PathItem {
    /// The operations present, in canonical method order.
    pub fn operations(&self) -> impl Iterator<Item = (Method, &OperationObject)> {
        [
            (Method::Get, &self.get),
            (Method::Put, &self.put),
            (Method::Post, &self.post),
            (Method::Delete, &self.delete),
            (Method::Options, &self.options),
            (Method::Head, &self.head),
            (Method::Patch, &self.patch),
            (Method::Trace, &self.trace),
        ]
        .into_iter()
        .filter_map(|(method, operation)| operation.as_ref().map(|operation| (method, operation)))
    }
}

/// One operation as written in the document.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationObject {
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBodyOrRef>,
    #[serde(default)]
    pub responses: IndexMap<String, ResponseOrRef>,
    /// `Some(vec![])` is significant: it overrides document security with
    /// no requirements at all.
    pub security: Option<Vec<SecurityRequirement>>,
}

/// Parameter location, as spelled in documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParameterObject {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    pub schema: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(ParameterObject),
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaTypeObject {
    pub schema: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestBodyObject {
    #[serde(default)]
    pub content: IndexMap<String, MediaTypeObject>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RequestBodyOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    RequestBody(RequestBodyObject),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeaderObject {
    #[serde(default)]
    pub required: bool,
    pub schema: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HeaderOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Header(HeaderObject),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseObject {
    #[serde(default)]
    pub headers: IndexMap<String, HeaderOrRef>,
    #[serde(default)]
    pub content: IndexMap<String, MediaTypeObject>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResponseOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Response(ResponseObject),
}

/// One requirement group: scheme name to requested scopes. All entries of
/// a group must hold together.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecuritySchemeType {
    ApiKey,
    Http,
    #[serde(rename = "oauth2")]
    OAuth2,
    OpenIdConnect,
    #[serde(rename = "mutualTLS")]
    MutualTls,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyIn {
    Query,
    Header,
    Cookie,
}

impl From<ApiKeyIn> for ApiKeyLocation {
    fn from(location: ApiKeyIn) -> Self {
        match location {
            ApiKeyIn::Query => ApiKeyLocation::Query,
            ApiKeyIn::Header => ApiKeyLocation::Header,
            ApiKeyIn::Cookie => ApiKeyLocation::Cookie,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecuritySchemeObject {
    #[serde(rename = "type")]
    pub scheme_type: SecuritySchemeType,
    pub name: Option<String>,
    #[serde(rename = "in")]
    pub location: Option<ApiKeyIn>,
    pub scheme: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, Value>,
    #[serde(default)]
    pub parameters: IndexMap<String, ParameterObject>,
    #[serde(default, rename = "requestBodies")]
    pub request_bodies: IndexMap<String, RequestBodyObject>,
    #[serde(default)]
    pub responses: IndexMap<String, ResponseObject>,
    #[serde(default)]
    pub headers: IndexMap<String, HeaderObject>,
    #[serde(default, rename = "securitySchemes")]
    pub security_schemes: IndexMap<String, SecuritySchemeObject>,
}

/// Everything a dialect hands the shared builder.
pub(crate) struct BuildInput<'d> {
    pub dialect: &'static str,
    pub location: &'d str,
    pub configuration: &'d DocumentConfiguration,
    pub paths: &'d IndexMap<String, PathItem>,
    pub components: Option<&'d Components>,
    pub document_security: Option<&'d [SecurityRequirement]>,
}

struct BuildContext<'d> {
    location: &'d str,
    components: Option<&'d Components>,
    document_security: Option<&'d [SecurityRequirement]>,
}

#[derive(Clone)]
struct ResolvedParameter {
    location: ParameterLocation,
    parameter: Parameter,
}

/// Build the canonical model from a typed document surface.
pub(crate) fn build_api(input: BuildInput<'_>) -> Result<Api, DocumentError> {
    let context = BuildContext {
        location: input.location,
        components: input.components,
        document_security: input.document_security,
    };
    let mut schema_ids: IndexSet<String> = IndexSet::new();

    // Component schemas go in first so their short names win the
    // derivation.
    if let Some(components) = input.components {
        for name in components.schemas.keys() {
            schema_ids.insert(schema_pointer(
                input.location,
                &["components", "schemas", name.as_str()],
            ));
        }
    }

    let mut routes = RouteTable::new();
    let mut paths = Vec::with_capacity(input.paths.len());
    for (pattern, item) in input.paths {
        let id = routes.add_route(pattern)?;
        let base = ["paths", pattern.as_str(), "parameters"];
        let shared = resolve_parameters(&item.parameters, &context, &base, &mut schema_ids)?;

        let mut operations = Vec::with_capacity(item.operations().count());
        for (method, operation) in item.operations() {
            operations.push(build_operation(
                method,
                pattern,
                operation,
                &shared,
                &context,
                &mut schema_ids,
            )?);
        }
        paths.push(Path {
            id,
            pattern: pattern.clone(),
            operations,
        });
    }

    let authentication = input
        .components
        .map(|components| convert_authentication(&components.security_schemes))
        .unwrap_or_default();

    let names = derive_schema_names(
        schema_ids.iter().map(String::as_str),
        &input.configuration.root_name_part,
    );

    log::debug!(
        "{}: built {} model with {} paths and {} schema names",
        input.location,
        input.dialect,
        paths.len(),
        names.len(),
    );

    Ok(Api {
        name: normalize_name(&input.configuration.root_name_part),
        location: input.location.to_string(),
        paths,
        authentication,
        names,
        routes,
    })
}

fn build_operation(
    method: Method,
    pattern: &str,
    operation: &OperationObject,
    shared: &[ResolvedParameter],
    context: &BuildContext<'_>,
    schema_ids: &mut IndexSet<String>,
) -> Result<Operation, DocumentError> {
    let method_segment = method.as_str().to_ascii_lowercase();

    let base = ["paths", pattern, method_segment.as_str(), "parameters"];
    let own = resolve_parameters(&operation.parameters, context, &base, schema_ids)?;
    let merged = merge_parameters(shared, own);

    let mut query_parameters = Vec::new();
    let mut header_parameters = Vec::new();
    let mut path_parameters = Vec::new();
    let mut cookie_parameters = Vec::new();
    for resolved in merged {
        match resolved.location {
            ParameterLocation::Query => query_parameters.push(resolved.parameter),
            ParameterLocation::Header => header_parameters.push(resolved.parameter),
            ParameterLocation::Path => path_parameters.push(resolved.parameter),
            ParameterLocation::Cookie => cookie_parameters.push(resolved.parameter),
        }
    }

    let bodies = match &operation.request_body {
        None => Vec::new(),
        Some(RequestBodyOrRef::RequestBody(body)) => {
            let base = [
                "paths",
                pattern,
                method_segment.as_str(),
                "requestBody",
                "content",
            ];
            resolve_bodies(&body.content, context.location, &base, schema_ids)
        }
        Some(RequestBodyOrRef::Ref { ref_path }) => {
            let name = component_name(ref_path, "requestBodies")?;
            let body = context
                .components
                .and_then(|components| components.request_bodies.get(name))
                .ok_or_else(|| DocumentError::RefTargetNotFound(ref_path.clone()))?;
            let base = ["components", "requestBodies", name, "content"];
            resolve_bodies(&body.content, context.location, &base, schema_ids)
        }
    };

    let responses_base = ["paths", pattern, method_segment.as_str(), "responses"];
    let results = build_results(&operation.responses, context, &responses_base, schema_ids)?;

    let raw_name = operation
        .operation_id
        .clone()
        .unwrap_or_else(|| route_to_name(method.as_str(), pattern));

    Ok(Operation {
        name: normalize_name(&raw_name),
        method,
        deprecated: operation.deprecated,
        summary: operation.summary.clone(),
        description: operation.description.clone(),
        query_parameters,
        header_parameters,
        path_parameters,
        cookie_parameters,
        bodies,
        results,
        authentication_requirements: convert_requirements(
            operation.security.as_deref(),
            context.document_security,
        ),
    })
}

/// Resolve a parameter list. `base` is the pointer to the list itself.
fn resolve_parameters(
    entries: &[ParameterOrRef],
    context: &BuildContext<'_>,
    base: &[&str],
    schema_ids: &mut IndexSet<String>,
) -> Result<Vec<ResolvedParameter>, DocumentError> {
    let mut resolved = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match entry {
            ParameterOrRef::Parameter(parameter) => {
                let index_segment = index.to_string();
                let mut segments: Vec<&str> = base.to_vec();
                segments.push(index_segment.as_str());
                segments.push("schema");
                resolved.push(resolve_parameter(parameter, context, &segments, schema_ids));
            }
            ParameterOrRef::Ref { ref_path } => {
                let name = component_name(ref_path, "parameters")?;
                let parameter = context
                    .components
                    .and_then(|components| components.parameters.get(name))
                    .ok_or_else(|| DocumentError::RefTargetNotFound(ref_path.clone()))?;
                let segments = ["components", "parameters", name, "schema"];
                resolved.push(resolve_parameter(parameter, context, &segments, schema_ids));
            }
        }
    }
    Ok(resolved)
}

fn resolve_parameter(
    parameter: &ParameterObject,
    context: &BuildContext<'_>,
    schema_segments: &[&str],
    schema_ids: &mut IndexSet<String>,
) -> ResolvedParameter {
    let schema_id = parameter
        .schema
        .as_ref()
        .map(|schema| schema_identifier(context.location, schema_segments, schema, schema_ids));
    ResolvedParameter {
        location: parameter.location,
        parameter: Parameter {
            name: parameter.name.clone(),
            // Path parameters are required no matter what the document
            // says.
            required: parameter.required || parameter.location == ParameterLocation::Path,
            schema_id,
        },
    }
}

/// Operation-level declarations override path-level ones with the same
/// name and location; everything else is kept, path level first.
fn merge_parameters(
    shared: &[ResolvedParameter],
    own: Vec<ResolvedParameter>,
) -> Vec<ResolvedParameter> {
    let mut merged: Vec<ResolvedParameter> = shared
        .iter()
        .filter(|inherited| {
            !own.iter().any(|overriding| {
                overriding.parameter.name == inherited.parameter.name
                    && overriding.location == inherited.location
            })
        })
        .cloned()
        .collect();
    merged.extend(own);
    merged
}

/// Resolve a content map into bodies. `base` is the pointer to the
/// `content` object.
fn resolve_bodies(
    content: &IndexMap<String, MediaTypeObject>,
    location: &str,
    base: &[&str],
    schema_ids: &mut IndexSet<String>,
) -> Vec<Body> {
    content
        .iter()
        .map(|(content_type, media_type)| {
            let schema_id = media_type.schema.as_ref().map(|schema| {
                let mut segments: Vec<&str> = base.to_vec();
                segments.push(content_type.as_str());
                segments.push("schema");
                schema_identifier(location, &segments, schema, schema_ids)
            });
            Body {
                content_type: content_type.clone(),
                schema_id,
            }
        })
        .collect()
}

/// Build the results of one operation, allocating disjoint status codes
/// from a fresh pool. Specifiers are processed most specific first so a
/// literal code is never swallowed by its class wildcard or `default`.
fn build_results(
    responses: &IndexMap<String, ResponseOrRef>,
    context: &BuildContext<'_>,
    base: &[&str],
    schema_ids: &mut IndexSet<String>,
) -> Result<Vec<OperationResult>, DocumentError> {
    let mut entries: Vec<(&String, &ResponseOrRef)> = responses.iter().collect();
    entries.sort_by(|(a, _), (b, _)| status_kind_comparer(a.as_str(), b.as_str()));

    let mut pool: BTreeSet<u16> = (100..600).collect();
    let mut results = Vec::with_capacity(entries.len());
    for (status_kind, entry) in entries {
        let status_codes: Vec<u16> = take_status_codes(&mut pool, status_kind)?.collect();
        let (response, response_base): (&ResponseObject, Vec<&str>) = match entry {
            ResponseOrRef::Response(response) => {
                let mut segments: Vec<&str> = base.to_vec();
                segments.push(status_kind.as_str());
                (response, segments)
            }
            ResponseOrRef::Ref { ref_path } => {
                let name = component_name(ref_path, "responses")?;
                let response = context
                    .components
                    .and_then(|components| components.responses.get(name))
                    .ok_or_else(|| DocumentError::RefTargetNotFound(ref_path.clone()))?;
                (response, vec!["components", "responses", name])
            }
        };

        let header_parameters =
            resolve_headers(&response.headers, context, &response_base, schema_ids)?;
        let mut content_base = response_base;
        content_base.push("content");
        let bodies = resolve_bodies(&response.content, context.location, &content_base, schema_ids);

        results.push(OperationResult {
            status_kind: status_kind.clone(),
            status_codes,
            header_parameters,
            bodies,
        });
    }
    Ok(results)
}

/// Resolve response headers into header parameters. `base` is the pointer
/// to the response object.
fn resolve_headers(
    headers: &IndexMap<String, HeaderOrRef>,
    context: &BuildContext<'_>,
    base: &[&str],
    schema_ids: &mut IndexSet<String>,
) -> Result<Vec<Parameter>, DocumentError> {
    let mut parameters = Vec::with_capacity(headers.len());
    for (name, entry) in headers {
        let (header, schema_segments): (&HeaderObject, Vec<&str>) = match entry {
            HeaderOrRef::Header(header) => {
                let mut segments: Vec<&str> = base.to_vec();
                segments.push("headers");
                segments.push(name.as_str());
                segments.push("schema");
                (header, segments)
            }
            HeaderOrRef::Ref { ref_path } => {
                let component = component_name(ref_path, "headers")?;
                let header = context
                    .components
                    .and_then(|components| components.headers.get(component))
                    .ok_or_else(|| DocumentError::RefTargetNotFound(ref_path.clone()))?;
                (header, vec!["components", "headers", component, "schema"])
            }
        };
        let schema_id = header
            .schema
            .as_ref()
            .map(|schema| schema_identifier(context.location, &schema_segments, schema, schema_ids));
        parameters.push(Parameter {
            name: name.clone(),
            required: header.required,
            schema_id,
        });
    }
    Ok(parameters)
}

/// The identifier of a schema node: the target pointer when the node is a
/// document-local `$ref`, its own position otherwise. Either way the id
/// is recorded for name derivation.
fn schema_identifier(
    location: &str,
    segments: &[&str],
    schema: &Value,
    schema_ids: &mut IndexSet<String>,
) -> String {
    let id = match local_ref(schema) {
        Some(pointer) => format!("{location}{pointer}"),
        None => schema_pointer(location, segments),
    };
    schema_ids.insert(id.clone());
    id
}

fn local_ref(node: &Value) -> Option<&str> {
    let pointer = node.get("$ref")?.as_str()?;
    pointer.starts_with("#/").then_some(pointer)
}

/// Parse `#/components/<section>/<name>` and return the name.
fn component_name<'r>(ref_path: &'r str, section: &str) -> Result<&'r str, DocumentError> {
    ref_path
        .strip_prefix("#/components/")
        .and_then(|rest| rest.split_once('/'))
        .filter(|(found, name)| *found == section && !name.is_empty() && !name.contains('/'))
        .map(|(_, name)| name)
        .ok_or_else(|| DocumentError::RefTargetNotFound(ref_path.to_string()))
}

fn convert_authentication(schemes: &IndexMap<String, SecuritySchemeObject>) -> Vec<Authentication> {
    schemes
        .iter()
        .filter_map(|(name, scheme)| {
            let kind = match scheme.scheme_type {
                SecuritySchemeType::ApiKey => AuthenticationKind::ApiKey {
                    parameter_name: scheme.name.clone().unwrap_or_else(|| name.clone()),
                    location: scheme
                        .location
                        .map(ApiKeyLocation::from)
                        .unwrap_or(ApiKeyLocation::Header),
                },
                SecuritySchemeType::Http => match scheme.scheme.as_deref() {
                    Some(http) if http.eq_ignore_ascii_case("basic") => {
                        AuthenticationKind::HttpBasic
                    }
                    Some(http) if http.eq_ignore_ascii_case("bearer") => {
                        AuthenticationKind::HttpBearer
                    }
                    other => {
                        log::warn!("skipping http security scheme {name} with scheme {other:?}");
                        return None;
                    }
                },
                unsupported => {
                    log::warn!("skipping unsupported security scheme {name} ({unsupported:?})");
                    return None;
                }
            };
            Some(Authentication {
                name: name.clone(),
                kind,
            })
        })
        .collect()
}

/// Operation security replaces document security outright; an explicit
/// empty list therefore opens the operation up.
fn convert_requirements(
    operation_security: Option<&[SecurityRequirement]>,
    document_security: Option<&[SecurityRequirement]>,
) -> Vec<Vec<AuthenticationRequirement>> {
    let effective = operation_security.or(document_security).unwrap_or(&[]);
    effective
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|(name, scopes)| AuthenticationRequirement {
                    authentication_name: name.clone(),
                    scopes: scopes.clone(),
                })
                .collect()
        })
        .collect()
}

/// Enumerate every embedded schema node with the identifier the builder
/// would use for it. Document-local `$ref` nodes are skipped; their
/// targets are enumerated at their own position.
pub(crate) fn collect_schema_nodes<'d>(
    location: &str,
    paths: &'d IndexMap<String, PathItem>,
    components: Option<&'d Components>,
) -> Vec<(String, &'d Value)> {
    let mut nodes: Vec<(String, &'d Value)> = Vec::new();

    if let Some(components) = components {
        for (name, schema) in &components.schemas {
            // Component schemas keep their position even when they are
            // references themselves; that position is their public name.
            nodes.push((
                schema_pointer(location, &["components", "schemas", name.as_str()]),
                schema,
            ));
        }
        for (name, parameter) in &components.parameters {
            if let Some(schema) = &parameter.schema {
                push_node(
                    &mut nodes,
                    location,
                    &["components", "parameters", name.as_str(), "schema"],
                    schema,
                );
            }
        }
        for (name, body) in &components.request_bodies {
            for (content_type, media_type) in &body.content {
                if let Some(schema) = &media_type.schema {
                    push_node(
                        &mut nodes,
                        location,
                        &[
                            "components",
                            "requestBodies",
                            name.as_str(),
                            "content",
                            content_type.as_str(),
                            "schema",
                        ],
                        schema,
                    );
                }
            }
        }
        for (name, response) in &components.responses {
            collect_response_nodes(
                &mut nodes,
                location,
                &["components", "responses", name.as_str()],
                response,
            );
        }
        for (name, header) in &components.headers {
            if let Some(schema) = &header.schema {
                push_node(
                    &mut nodes,
                    location,
                    &["components", "headers", name.as_str(), "schema"],
                    schema,
                );
            }
        }
    }

    for (pattern, item) in paths {
        collect_parameter_nodes(
            &mut nodes,
            location,
            &["paths", pattern.as_str(), "parameters"],
            &item.parameters,
        );
        for (method, operation) in item.operations() {
            let method_segment = method.as_str().to_ascii_lowercase();
            collect_parameter_nodes(
                &mut nodes,
                location,
                &["paths", pattern.as_str(), method_segment.as_str(), "parameters"],
                &operation.parameters,
            );
            if let Some(RequestBodyOrRef::RequestBody(body)) = &operation.request_body {
                for (content_type, media_type) in &body.content {
                    if let Some(schema) = &media_type.schema {
                        push_node(
                            &mut nodes,
                            location,
                            &[
                                "paths",
                                pattern.as_str(),
                                method_segment.as_str(),
                                "requestBody",
                                "content",
                                content_type.as_str(),
                                "schema",
                            ],
                            schema,
                        );
                    }
                }
            }
            for (status_kind, entry) in &operation.responses {
                if let ResponseOrRef::Response(response) = entry {
                    collect_response_nodes(
                        &mut nodes,
                        location,
                        &[
                            "paths",
                            pattern.as_str(),
                            method_segment.as_str(),
                            "responses",
                            status_kind.as_str(),
                        ],
                        response,
                    );
                }
            }
        }
    }

    nodes
}

fn push_node<'d>(
    nodes: &mut Vec<(String, &'d Value)>,
    location: &str,
    segments: &[&str],
    schema: &'d Value,
) {
    if local_ref(schema).is_none() {
        nodes.push((schema_pointer(location, segments), schema));
    }
}

fn collect_parameter_nodes<'d>(
    nodes: &mut Vec<(String, &'d Value)>,
    location: &str,
    base: &[&str],
    entries: &'d [ParameterOrRef],
) {
    for (index, entry) in entries.iter().enumerate() {
        if let ParameterOrRef::Parameter(parameter) = entry {
            if let Some(schema) = &parameter.schema {
                let index_segment = index.to_string();
                let mut segments: Vec<&str> = base.to_vec();
                segments.push(index_segment.as_str());
                segments.push("schema");
                push_node(nodes, location, &segments, schema);
            }
        }
    }
}

fn collect_response_nodes<'d>(
    nodes: &mut Vec<(String, &'d Value)>,
    location: &str,
    base: &[&str],
    response: &'d ResponseObject,
) {
    for (header_name, entry) in &response.headers {
        if let HeaderOrRef::Header(header) = entry {
            if let Some(schema) = &header.schema {
                let mut segments: Vec<&str> = base.to_vec();
                segments.push("headers");
                segments.push(header_name.as_str());
                segments.push("schema");
                push_node(nodes, location, &segments, schema);
            }
        }
    }
    for (content_type, media_type) in &response.content {
        if let Some(schema) = &media_type.schema {
            let mut segments: Vec<&str> = base.to_vec();
            segments.push("content");
            segments.push(content_type.as_str());
            segments.push("schema");
            push_node(nodes, location, &segments, schema);
        }
    }
}
