use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use unispec_core::auth::is_authenticated;
use unispec_core::dialect::{DialectRegistry, Document, DocumentConfiguration, DocumentInit};
use unispec_core::error::DocumentError;
use unispec_core::mock::is_operation_mockable;
use unispec_core::model::{Api, ApiKeyLocation, AuthenticationKind, Method, Operation};
use unispec_core::routing::RouteTable;
use unispec_core::schema::collect_examples;

const PETSTORE: &str = include_str!("fixtures/petstore-30.yaml");
const CHAT: &str = include_str!("fixtures/chat-31.yaml");

fn bind(location: &str, yaml: &str) -> Document {
    let node: Value = serde_yaml_ng::from_str(yaml).expect("fixture should be valid yaml");
    DialectRegistry::standard()
        .bind(DocumentInit {
            location: location.to_string(),
            node,
            configuration: DocumentConfiguration::default(),
        })
        .expect("fixture should bind")
}

fn petstore() -> (Document, Api) {
    let document = bind("petstore-30.yaml", PETSTORE);
    let api = document.api_model().expect("petstore should build");
    (document, api)
}

fn operation<'a>(api: &'a Api, name: &str) -> &'a Operation {
    api.operations()
        .find(|operation| operation.name.camel_case == name)
        .unwrap_or_else(|| panic!("operation {name} should exist"))
}

#[test]
fn paths_keep_document_order_and_route_ids() {
    let (_, api) = petstore();
    assert_eq!(api.location, "petstore-30.yaml");
    assert_eq!(api.name.pascal_case, "Api");

    let patterns: Vec<(usize, &str)> = api
        .paths
        .iter()
        .map(|path| (path.id, path.pattern.as_str()))
        .collect();
    assert_eq!(patterns, vec![(0, "/pets"), (1, "/pets/{petId}")]);

    let hit = api.routes.match_path("/pets/42").expect("path should match");
    assert_eq!(hit.id, 1);
    assert_eq!(hit.parameters, vec![("petId".to_string(), "42".to_string())]);
    assert_eq!(api.path(hit.id).map(|path| path.pattern.as_str()), Some("/pets/{petId}"));
    assert!(api.routes.match_path("/owners").is_none());
}

#[test]
fn route_table_survives_save_and_load() {
    let (_, api) = petstore();
    let restored = RouteTable::load(&api.routes.save()).expect("saved table should load");
    assert_eq!(restored.len(), api.routes.len());
    assert_eq!(restored.match_path("/pets/9").map(|hit| hit.id), Some(1));
    assert_eq!(restored.template(0), Some("/pets"));
}

#[test]
fn operations_carry_their_document_surface() {
    let (_, api) = petstore();
    assert_eq!(api.operations().count(), 4);

    let list = operation(&api, "listPets");
    assert_eq!(list.method, Method::Get);
    assert_eq!(list.summary.as_deref(), Some("List all pets"));
    assert!(!list.deprecated);
    assert_eq!(list.query_parameters.len(), 1);
    let limit = &list.query_parameters[0];
    assert_eq!(limit.name, "limit");
    assert!(!limit.required);
    assert_eq!(
        limit.schema_id.as_deref(),
        Some("petstore-30.yaml#/paths/~1pets/get/parameters/0/schema")
    );
    assert_eq!(list.parameters().count(), 1);
    assert!(list.bodies.is_empty());
}

#[test]
fn referenced_components_resolve_one_hop() {
    let (_, api) = petstore();

    // Request body through components, schema through a nested local ref.
    let create = operation(&api, "createPet");
    assert_eq!(create.bodies.len(), 1);
    assert_eq!(create.bodies[0].content_type, "application/json");
    assert_eq!(
        create.bodies[0].schema_id.as_deref(),
        Some("petstore-30.yaml#/components/schemas/NewPet")
    );

    // Path parameter through components, forced required by location.
    let get = operation(&api, "getPet");
    assert_eq!(get.path_parameters.len(), 1);
    let pet_id = &get.path_parameters[0];
    assert_eq!(pet_id.name, "petId");
    assert!(pet_id.required);
    assert_eq!(
        pet_id.schema_id.as_deref(),
        Some("petstore-30.yaml#/components/parameters/PetId/schema")
    );

    // Referenced response with a referenced header.
    let list = operation(&api, "listPets");
    let client_error = &list.results[1];
    assert_eq!(client_error.status_kind, "4XX");
    assert_eq!(client_error.header_parameters.len(), 1);
    assert_eq!(client_error.header_parameters[0].name, "x-request-id");
    assert_eq!(
        client_error.header_parameters[0].schema_id.as_deref(),
        Some("petstore-30.yaml#/components/headers/RequestId/schema")
    );
    assert_eq!(
        client_error.bodies[0].schema_id.as_deref(),
        Some("petstore-30.yaml#/components/schemas/Error")
    );
}

#[test]
fn results_allocate_disjoint_status_codes_most_specific_first() {
    let (_, api) = petstore();
    let list = operation(&api, "listPets");

    let kinds: Vec<&str> = list
        .results
        .iter()
        .map(|result| result.status_kind.as_str())
        .collect();
    assert_eq!(kinds, vec!["200", "4XX", "default"]);

    assert_eq!(list.results[0].status_codes, vec![200]);

    let client_error = &list.results[1].status_codes;
    assert_eq!(client_error.len(), 100);
    assert_eq!(client_error.first(), Some(&400));
    assert!(client_error.contains(&404));

    let fallback = &list.results[2].status_codes;
    assert_eq!(fallback.len(), 399);
    assert!(fallback.contains(&100));
    assert!(fallback.contains(&500));
    assert!(!fallback.contains(&200));
    assert!(!fallback.contains(&404));

    // Pools are per operation: createPet's default sees a fresh range.
    let create = operation(&api, "createPet");
    assert_eq!(create.results[0].status_codes, vec![201]);
    assert_eq!(create.results[1].status_codes.len(), 499);

    // Every operation's results stay pairwise disjoint.
    for operation in api.operations() {
        let mut seen = BTreeSet::new();
        for result in &operation.results {
            for code in &result.status_codes {
                assert!(seen.insert(*code), "{} allocated twice", code);
            }
        }
    }
}

#[test]
fn response_bodies_keep_every_content_type() {
    let (_, api) = petstore();
    let get = operation(&api, "getPet");
    let ok = &get.results[0];
    assert_eq!(ok.status_kind, "200");
    let content_types: Vec<&str> = ok
        .bodies
        .iter()
        .map(|body| body.content_type.as_str())
        .collect();
    assert_eq!(content_types, vec!["application/json", "text/plain"]);
    assert_eq!(
        ok.bodies[1].schema_id.as_deref(),
        Some("petstore-30.yaml#/paths/~1pets~1{petId}/get/responses/200/content/text~1plain/schema")
    );
}

#[test]
fn security_schemes_and_requirements_convert() {
    let (_, api) = petstore();

    // The oauth2 scheme is dropped, the supported two survive in order.
    assert_eq!(api.authentication.len(), 2);
    assert_eq!(api.authentication[0].name, "apiKey");
    assert_eq!(
        api.authentication[0].kind,
        AuthenticationKind::ApiKey {
            parameter_name: "X-Api-Key".to_string(),
            location: ApiKeyLocation::Header,
        }
    );
    assert_eq!(api.authentication[1].kind, AuthenticationKind::HttpBearer);

    // security: [] overrides the document default into an open operation.
    let list = operation(&api, "listPets");
    assert!(list.authentication_requirements.is_empty());

    // No operation security falls back to the document requirement.
    let create = operation(&api, "createPet");
    assert_eq!(create.authentication_requirements.len(), 1);
    assert_eq!(
        create.authentication_requirements[0][0].authentication_name,
        "apiKey"
    );

    // Alternatives and conjunctions survive as written.
    let delete = operation(&api, "deletePet");
    let groups: Vec<Vec<&str>> = delete
        .authentication_requirements
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|item| item.authentication_name.as_str())
                .collect()
        })
        .collect();
    assert_eq!(groups, vec![vec!["apiKey", "bearerAuth"], vec!["bearerAuth"]]);
}

#[test]
fn model_requirements_drive_the_evaluator() {
    let (_, api) = petstore();
    let list = operation(&api, "listPets");
    let delete = operation(&api, "deletePet");

    let nobody: BTreeMap<String, Option<&str>> = BTreeMap::new();
    assert!(is_authenticated(&list.authentication_requirements, &nobody));
    assert!(!is_authenticated(&delete.authentication_requirements, &nobody));

    let bearer_only: BTreeMap<String, Option<&str>> =
        [("bearerAuth".to_string(), Some("token"))].into_iter().collect();
    assert!(is_authenticated(&delete.authentication_requirements, &bearer_only));

    let key_only: BTreeMap<String, Option<&str>> =
        [("apiKey".to_string(), Some("secret"))].into_iter().collect();
    assert!(!is_authenticated(&delete.authentication_requirements, &key_only));

    let revoked: BTreeMap<String, Option<&str>> =
        [("bearerAuth".to_string(), None)].into_iter().collect();
    assert!(!is_authenticated(&delete.authentication_requirements, &revoked));
}

#[test]
fn display_names_cover_the_model_and_stay_unique() {
    let (document, api) = petstore();

    assert_eq!(api.names.len(), 9);
    assert_eq!(
        api.names["petstore-30.yaml#/components/schemas/Pet"].pascal_case,
        "Pet"
    );
    assert_eq!(
        api.names["petstore-30.yaml#/components/schemas/NewPet"].pascal_case,
        "NewPet"
    );

    // The two inline 200 response schemas collide on their tails and get
    // widened apart.
    assert_eq!(
        api.names["petstore-30.yaml#/paths/~1pets/get/responses/200/content/application~1json/schema"]
            .pascal_case,
        "PetsGet200"
    );
    assert_eq!(
        api.names["petstore-30.yaml#/paths/~1pets~1{petId}/get/responses/200/content/text~1plain/schema"]
            .pascal_case,
        "PetsPetIdGet200"
    );

    let mut seen = BTreeSet::new();
    for name in api.names.values() {
        assert!(seen.insert(name.pascal_case.clone()), "duplicate {}", name.pascal_case);
    }

    // Every schema id the model mentions has a name and a node.
    let node_ids: BTreeSet<String> = document
        .schema_nodes()
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    for operation in api.operations() {
        let parameter_ids = operation
            .parameters()
            .chain(operation.results.iter().flat_map(|r| r.header_parameters.iter()))
            .filter_map(|parameter| parameter.schema_id.as_deref());
        let body_ids = operation
            .bodies
            .iter()
            .chain(operation.results.iter().flat_map(|r| r.bodies.iter()))
            .filter_map(|body| body.schema_id.as_deref());
        for id in parameter_ids.chain(body_ids) {
            assert!(api.names.contains_key(id), "{id} has no display name");
            assert!(node_ids.contains(id), "{id} has no schema node");
        }
    }
}

#[test]
fn stated_examples_decide_mockability() {
    let (document, api) = petstore();
    let examples = collect_examples(document.schema_nodes());
    let mockable: BTreeSet<String> = examples.keys().cloned().collect();

    assert!(mockable.contains("petstore-30.yaml#/components/schemas/Pet"));
    assert!(!mockable.contains("petstore-30.yaml#/components/schemas/NewPet"));
    assert_eq!(
        examples["petstore-30.yaml#/components/parameters/PetId/schema"],
        serde_json::json!(7)
    );

    assert!(is_operation_mockable(operation(&api, "listPets"), &mockable));
    assert!(!is_operation_mockable(operation(&api, "createPet"), &mockable));
    assert!(is_operation_mockable(operation(&api, "getPet"), &mockable));
    assert!(is_operation_mockable(operation(&api, "deletePet"), &mockable));
}

#[test]
fn openapi_31_documents_build_without_webhooks() {
    let document = bind("chat-31.yaml", CHAT);
    let api = document.api_model().expect("chat should build");

    assert_eq!(api.paths.len(), 1);
    assert_eq!(api.paths[0].pattern, "/sessions");

    let open = &api.paths[0].operations[0];
    // No operationId: the name falls back to the route.
    assert_eq!(open.name.camel_case, "createSessions");
    assert_eq!(open.method, Method::Post);
    assert!(open.deprecated);

    assert_eq!(open.cookie_parameters.len(), 1);
    assert_eq!(open.cookie_parameters[0].name, "client");
    assert!(!open.cookie_parameters[0].required);

    assert_eq!(open.bodies.len(), 1);
    assert_eq!(
        open.bodies[0].schema_id.as_deref(),
        Some("chat-31.yaml#/components/schemas/SessionRequest")
    );

    let kinds: Vec<&str> = open.results.iter().map(|r| r.status_kind.as_str()).collect();
    assert_eq!(kinds, vec!["201", "5XX"]);
    assert_eq!(open.results[0].status_codes, vec![201]);
    assert_eq!(open.results[1].status_codes.len(), 100);
    assert_eq!(open.results[1].status_codes.first(), Some(&500));

    // 3.1 `examples` arrays and `const` both count as stated examples.
    let examples = collect_examples(document.schema_nodes());
    assert_eq!(
        examples["chat-31.yaml#/components/schemas/Session"]["id"],
        serde_json::json!("s-1")
    );
    assert_eq!(
        examples["chat-31.yaml#/paths/~1sessions/post/parameters/0/schema"],
        serde_json::json!("web")
    );

    // The request body schema has no example, so the operation is not
    // mockable.
    let mockable: BTreeSet<String> = examples.keys().cloned().collect();
    assert!(!is_operation_mockable(open, &mockable));
}

#[test]
fn unresolved_references_fail_the_build() {
    let yaml = r#"
openapi: 3.0.2
paths:
  /things:
    get:
      parameters:
        - $ref: '#/components/parameters/Missing'
      responses:
        '200':
          description: fine
"#;
    let document = bind("broken.yaml", yaml);
    match document.api_model() {
        Err(DocumentError::RefTargetNotFound(path)) => {
            assert_eq!(path, "#/components/parameters/Missing");
        }
        other => panic!("expected RefTargetNotFound, got {other:?}"),
    }
}

#[test]
fn invalid_status_specifiers_fail_the_build() {
    let yaml = r#"
openapi: 3.0.2
paths:
  /things:
    get:
      responses:
        '20X':
          description: broken
"#;
    let document = bind("broken.yaml", yaml);
    match document.api_model() {
        Err(DocumentError::Status(invalid)) => assert_eq!(invalid.0, "20X"),
        other => panic!("expected an invalid status kind, got {other:?}"),
    }
}
