use std::collections::BTreeSet;

use unispec_core::mock::JSON_CONTENT_TYPE;
use unispec_core::model::{Api, AuthenticationKind, Operation, OperationResult, Parameter};
use unispec_core::naming::normalize_name;
use unispec_core::status::StatusKind;
use unispec_core::text;
use unispec_core::text::NestedText;

use super::file_header;
use crate::generator::TypeScriptConfig;
use crate::type_names::{payload_type, preferred_body, ts_type};

/// Emit `client.ts`: one async method per operation, plus the embedded
/// credential evaluation the methods gate requests on.
pub fn emit_client(api: &Api, config: &TypeScriptConfig) -> NestedText {
    let mut sections: Vec<NestedText> = vec![file_header(api)];
    if let Some(imports) = emit_type_imports(api) {
        sections.push(imports);
    }
    sections.push(emit_prelude());
    sections.push(emit_schemes(api));
    sections.push(emit_helpers());
    sections.push(emit_class_open(api, config));
    for path in &api.paths {
        for operation in &path.operations {
            sections.push(emit_operation(api, &path.pattern, operation));
        }
    }
    sections.push(text!["}\n"]);
    NestedText::Tree(sections)
}

/// Escape `*/` sequences that would prematurely close JSDoc blocks.
fn escape_jsdoc(value: &str) -> String {
    value.replace("*/", "*\\/").replace('\n', "\n   * ")
}

fn emit_type_imports(api: &Api) -> Option<NestedText> {
    let mut names: BTreeSet<&str> = BTreeSet::new();
    for operation in api.operations() {
        for parameter in operation.parameters() {
            collect_alias(api, parameter.schema_id.as_deref(), &mut names);
        }
        if let Some(body) = preferred_body(&operation.bodies) {
            if body.content_type == JSON_CONTENT_TYPE {
                collect_alias(api, body.schema_id.as_deref(), &mut names);
            }
        }
        for result in &operation.results {
            if result.status_codes.is_empty() || all_error(result) {
                continue;
            }
            if let Some(body) = preferred_body(&result.bodies) {
                if body.content_type == JSON_CONTENT_TYPE {
                    collect_alias(api, body.schema_id.as_deref(), &mut names);
                }
            }
        }
    }
    if names.is_empty() {
        return None;
    }
    let list = names.into_iter().collect::<Vec<_>>().join(", ");
    Some(text!["\nimport type { ", list, " } from \"./types\";\n"])
}

fn collect_alias<'a>(api: &'a Api, schema_id: Option<&str>, names: &mut BTreeSet<&'a str>) {
    if let Some(id) = schema_id {
        if let Some(name) = api.names.get(id) {
            names.insert(name.pascal_case.as_str());
        }
    }
}

fn emit_prelude() -> NestedText {
    text![r#"
/** Credential values by security scheme name; null means revoked. */
export type Credentials = Record<string, string | null | undefined>;

/** Per-call overrides. */
export interface RequestOptions {
  credentials?: Credentials;
  headers?: Record<string, string>;
  signal?: AbortSignal;
}

/** Thrown before the request when no requirement group is satisfied. */
export class MissingCredentialsError extends Error {
  constructor(operation: string) {
    super(`no credential group satisfied for ${operation}`);
    this.name = "MissingCredentialsError";
  }
}

/** Thrown for error responses and for statuses outside the contract. */
export class ApiError extends Error {
  readonly status: number;
  readonly payload: unknown;

  constructor(status: number, payload: unknown) {
    super(`request failed with status ${status}`);
    this.name = "ApiError";
    this.status = status;
    this.payload = payload;
  }
}

/**
 * Requirement groups are alternatives; every scheme named by a group
 * must have a present credential value for the group to hold. No groups
 * at all means the operation is open.
 */
export function isAuthenticated(requirements: string[][], credentials: Credentials): boolean {
  if (requirements.length === 0) {
    return true;
  }
  return requirements.some((group) => group.every((name) => credentials[name] != null));
}
"#]
}

fn emit_schemes(api: &Api) -> NestedText {
    let entries: Vec<NestedText> = api
        .authentication
        .iter()
        .map(|scheme| {
            let line = match &scheme.kind {
                AuthenticationKind::ApiKey {
                    parameter_name,
                    location,
                } => format!(
                    "  \"{}\": {{ kind: \"apiKey\", parameter: \"{}\", location: \"{}\" }},\n",
                    scheme.name,
                    parameter_name,
                    location.as_str()
                ),
                AuthenticationKind::HttpBasic => {
                    format!("  \"{}\": {{ kind: \"httpBasic\" }},\n", scheme.name)
                }
                AuthenticationKind::HttpBearer => {
                    format!("  \"{}\": {{ kind: \"httpBearer\" }},\n", scheme.name)
                }
            };
            NestedText::Leaf(line)
        })
        .collect();
    text![
        r#"
type SecurityScheme =
  | { kind: "apiKey"; parameter: string; location: "query" | "header" | "cookie" }
  | { kind: "httpBasic" }
  | { kind: "httpBearer" };

const securitySchemes: Record<string, SecurityScheme> = {
"#,
        entries,
        "};\n",
    ]
}

fn emit_helpers() -> NestedText {
    text![r#"
function appendCookie(existing: string | undefined, pair: string): string {
  return existing === undefined ? pair : `${existing}; ${pair}`;
}

function applyCredentials(
  requirements: string[][],
  credentials: Credentials,
  url: URL,
  headers: Record<string, string>,
): void {
  const group = requirements.find((g) => g.every((name) => credentials[name] != null));
  if (group === undefined) {
    return;
  }
  for (const name of group) {
    const scheme: SecurityScheme | undefined = securitySchemes[name];
    const value = credentials[name];
    if (scheme === undefined || value == null) {
      continue;
    }
    switch (scheme.kind) {
      case "apiKey":
        if (scheme.location === "query") {
          url.searchParams.set(scheme.parameter, value);
        } else if (scheme.location === "header") {
          headers[scheme.parameter] = value;
        } else {
          headers["cookie"] = appendCookie(headers["cookie"], `${scheme.parameter}=${value}`);
        }
        break;
      case "httpBasic":
        headers["authorization"] = `Basic ${btoa(value)}`;
        break;
      case "httpBearer":
        headers["authorization"] = `Bearer ${value}`;
        break;
    }
  }
}
"#]
}

fn emit_class_open(api: &Api, config: &TypeScriptConfig) -> NestedText {
    let default_base = config
        .base_url
        .as_deref()
        .map(|base| format!(" = \"{base}\""))
        .unwrap_or_default();
    text![
        "\nexport class ",
        api.name.pascal_case.as_str(),
        "Client {\n",
        "  constructor(\n",
        format!("    private readonly baseUrl: string{default_base},\n"),
        "    private readonly credentials: Credentials = {},\n",
        "  ) {}\n",
    ]
}

fn emit_operation(api: &Api, pattern: &str, operation: &Operation) -> NestedText {
    let mut lines: Vec<NestedText> = vec![
        emit_jsdoc(pattern, operation),
        signature(api, operation),
        url_line(pattern, operation),
    ];
    for parameter in &operation.query_parameters {
        lines.push(query_line(parameter));
    }
    lines.push(text![
        "    const headers: Record<string, string> = { ...options?.headers };\n",
    ]);
    for parameter in &operation.header_parameters {
        lines.push(header_line(parameter));
    }
    for parameter in &operation.cookie_parameters {
        lines.push(cookie_line(parameter));
    }
    lines.push(auth_lines(operation));
    lines.push(fetch_lines(operation));
    lines.push(response_lines(api, operation));
    lines.push(text!["  }\n"]);
    NestedText::Tree(lines)
}

fn emit_jsdoc(pattern: &str, operation: &Operation) -> NestedText {
    let mut lines: Vec<NestedText> = vec![text!["\n  /**\n"]];
    if let Some(summary) = &operation.summary {
        lines.push(text!["   * ", escape_jsdoc(summary), "\n   *\n"]);
    }
    lines.push(text![format!(
        "   * `{} {}`\n",
        operation.method.as_str(),
        pattern
    )]);
    if let Some(description) = &operation.description {
        lines.push(text!["   *\n   * ", escape_jsdoc(description), "\n"]);
    }
    if operation.deprecated {
        lines.push(text!["   * @deprecated\n"]);
    }
    lines.push(text!["   */\n"]);
    NestedText::Tree(lines)
}

fn signature(api: &Api, operation: &Operation) -> NestedText {
    let mut required: Vec<String> = Vec::new();
    let mut optional: Vec<String> = Vec::new();
    for parameter in &operation.path_parameters {
        required.push(format!(
            "{}: {}",
            arg_name(parameter),
            ts_type(api, parameter.schema_id.as_deref())
        ));
    }
    for parameter in operation
        .query_parameters
        .iter()
        .chain(&operation.header_parameters)
        .chain(&operation.cookie_parameters)
    {
        let ty = ts_type(api, parameter.schema_id.as_deref());
        if parameter.required {
            required.push(format!("{}: {}", arg_name(parameter), ty));
        } else {
            optional.push(format!("{}?: {}", arg_name(parameter), ty));
        }
    }
    if let Some(body) = preferred_body(&operation.bodies) {
        required.push(format!("body: {}", payload_type(api, body)));
    }
    optional.push("options?: RequestOptions".to_string());
    let mut parts = required;
    parts.extend(optional);
    text![
        "  async ",
        operation.name.camel_case.as_str(),
        "(",
        parts.join(", "),
        "): Promise<",
        return_type(api, operation),
        "> {\n",
    ]
}

fn return_type(api: &Api, operation: &Operation) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let mut saw_undefined = false;
    for result in &operation.results {
        if result.status_codes.is_empty() || all_error(result) {
            continue;
        }
        match preferred_body(&result.bodies) {
            Some(body) => {
                let ty = payload_type(api, body);
                if !parts.contains(&ty) {
                    parts.push(ty);
                }
            }
            None => saw_undefined = true,
        }
    }
    if parts.is_empty() {
        return "void".to_string();
    }
    let mut joined = parts.join(" | ");
    if saw_undefined {
        joined.push_str(" | undefined");
    }
    joined
}

fn url_line(pattern: &str, operation: &Operation) -> NestedText {
    if operation.path_parameters.is_empty() {
        return text![format!("    const url = new URL(\"{pattern}\", this.baseUrl);\n")];
    }
    let mut template = pattern.to_string();
    for parameter in &operation.path_parameters {
        let placeholder = format!("{{{}}}", parameter.name);
        let substitution = format!("${{encodeURIComponent(String({}))}}", arg_name(parameter));
        template = template.replace(&placeholder, &substitution);
    }
    text![format!("    const url = new URL(`{template}`, this.baseUrl);\n")]
}

fn query_line(parameter: &Parameter) -> NestedText {
    let name = arg_name(parameter);
    let set = format!(
        "url.searchParams.set(\"{}\", String({}));",
        parameter.name, name
    );
    if parameter.required {
        text![format!("    {set}\n")]
    } else {
        text![format!(
            "    if ({name} !== undefined) {{\n      {set}\n    }}\n"
        )]
    }
}

fn header_line(parameter: &Parameter) -> NestedText {
    let name = arg_name(parameter);
    let set = format!("headers[\"{}\"] = String({});", parameter.name, name);
    if parameter.required {
        text![format!("    {set}\n")]
    } else {
        text![format!(
            "    if ({name} !== undefined) {{\n      {set}\n    }}\n"
        )]
    }
}

fn cookie_line(parameter: &Parameter) -> NestedText {
    let name = arg_name(parameter);
    let set = format!(
        "headers[\"cookie\"] = appendCookie(headers[\"cookie\"], `{}=${{encodeURIComponent(String({}))}}`);",
        parameter.name, name
    );
    if parameter.required {
        text![format!("    {set}\n")]
    } else {
        text![format!(
            "    if ({name} !== undefined) {{\n      {set}\n    }}\n"
        )]
    }
}

fn auth_lines(operation: &Operation) -> NestedText {
    if operation.authentication_requirements.is_empty() {
        return NestedText::empty();
    }
    let groups: Vec<String> = operation
        .authentication_requirements
        .iter()
        .map(|group| {
            let items: Vec<String> = group
                .iter()
                .map(|item| format!("\"{}\"", item.authentication_name))
                .collect();
            format!("[{}]", items.join(", "))
        })
        .collect();
    text![
        "    const credentials: Credentials = { ...this.credentials, ...options?.credentials };\n",
        format!("    const requirements = [{}];\n", groups.join(", ")),
        "    if (!isAuthenticated(requirements, credentials)) {\n",
        format!(
            "      throw new MissingCredentialsError(\"{}\");\n",
            operation.name.camel_case
        ),
        "    }\n",
        "    applyCredentials(requirements, credentials, url, headers);\n",
    ]
}

fn fetch_lines(operation: &Operation) -> NestedText {
    let mut lines: Vec<NestedText> = Vec::new();
    let body = preferred_body(&operation.bodies);
    if let Some(body) = body {
        lines.push(text![format!(
            "    headers[\"content-type\"] = \"{}\";\n",
            body.content_type
        )]);
    }
    lines.push(text![
        "    const response = await fetch(url, {\n",
        format!("      method: \"{}\",\n", operation.method.as_str()),
        "      headers,\n",
    ]);
    if let Some(body) = body {
        if body.content_type == JSON_CONTENT_TYPE {
            lines.push(text!["      body: JSON.stringify(body),\n"]);
        } else {
            lines.push(text!["      body: String(body),\n"]);
        }
    }
    lines.push(text!["      signal: options?.signal,\n", "    });\n"]);
    NestedText::Tree(lines)
}

/// Response dispatch mirrors the allocation that produced the claimed
/// codes: branches run most specific first, so a window check is exactly
/// a claimed-set check by the time it runs.
fn response_lines(api: &Api, operation: &Operation) -> NestedText {
    let mut lines: Vec<NestedText> = Vec::new();
    let mut tail_emitted = false;
    for result in &operation.results {
        if result.status_codes.is_empty() {
            continue;
        }
        match branch_condition(result) {
            Some(condition) => {
                lines.push(text![format!("    if ({condition}) {{\n")]);
                lines.push(branch_body(api, result, "      "));
                lines.push(text!["    }\n"]);
            }
            None => {
                lines.push(tail_body(api, result));
                tail_emitted = true;
                break;
            }
        }
    }
    if !tail_emitted {
        lines.push(text![
            "    throw new ApiError(response.status, await response.text());\n",
        ]);
    }
    NestedText::Tree(lines)
}

fn branch_condition(result: &OperationResult) -> Option<String> {
    match StatusKind::parse(&result.status_kind) {
        Ok(StatusKind::Code(code)) => Some(format!("response.status === {code}")),
        Ok(StatusKind::Class(class)) => {
            let low = u16::from(class) * 100;
            Some(format!(
                "response.status >= {low} && response.status <= {}",
                low + 99
            ))
        }
        Ok(StatusKind::Default) => None,
        Err(_) => Some("false".to_string()),
    }
}

fn all_error(result: &OperationResult) -> bool {
    result.status_codes.first().is_some_and(|code| *code >= 400)
}

fn branch_body(api: &Api, result: &OperationResult, indent: &str) -> NestedText {
    let body = preferred_body(&result.bodies);
    if all_error(result) {
        let argument = match body {
            Some(body) if body.content_type == JSON_CONTENT_TYPE => "await response.json()",
            Some(_) => "await response.text()",
            None => "undefined",
        };
        return text![format!(
            "{indent}throw new ApiError(response.status, {argument});\n"
        )];
    }
    match body {
        Some(body) if body.content_type == JSON_CONTENT_TYPE => {
            let ty = ts_type(api, body.schema_id.as_deref());
            text![format!("{indent}return (await response.json()) as {ty};\n")]
        }
        Some(_) => text![format!("{indent}return await response.text();\n")],
        None => text![format!("{indent}return undefined;\n")],
    }
}

fn tail_body(api: &Api, result: &OperationResult) -> NestedText {
    let all_success = result.status_codes.last().is_some_and(|code| *code < 400);
    if all_success || all_error(result) {
        return branch_body(api, result, "    ");
    }
    match preferred_body(&result.bodies) {
        Some(body) if body.content_type == JSON_CONTENT_TYPE => {
            let ty = ts_type(api, body.schema_id.as_deref());
            text![
                format!("    const payload = (await response.json()) as {ty};\n"),
                "    if (response.status >= 400) {\n",
                "      throw new ApiError(response.status, payload);\n",
                "    }\n",
                "    return payload;\n",
            ]
        }
        Some(_) => text![
            "    const payload = await response.text();\n",
            "    if (response.status >= 400) {\n",
            "      throw new ApiError(response.status, payload);\n",
            "    }\n",
            "    return payload;\n",
        ],
        None => text![
            "    if (response.status >= 400) {\n",
            "      throw new ApiError(response.status, undefined);\n",
            "    }\n",
            "    return undefined;\n",
        ],
    }
}

fn arg_name(parameter: &Parameter) -> String {
    normalize_name(&parameter.name).camel_case
}
