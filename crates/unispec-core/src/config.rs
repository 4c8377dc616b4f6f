use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::dialect::DocumentConfiguration;

/// Top-level project configuration loaded from `.unispec.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UnispecConfig {
    pub input: String,
    pub output: String,
    /// Root name part for generated identifiers.
    pub root_name: String,
    pub targets: Vec<TargetKind>,
    pub typescript: TypeScriptTargetConfig,
}

impl Default for UnispecConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: "generated".to_string(),
            root_name: "Api".to_string(),
            targets: vec![TargetKind::Typescript],
            typescript: TypeScriptTargetConfig::default(),
        }
    }
}

impl UnispecConfig {
    /// The reader configuration this project configuration implies.
    pub fn document_configuration(&self) -> DocumentConfiguration {
        DocumentConfiguration {
            root_name_part: self.root_name.clone(),
        }
    }
}

/// Which emitters to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Typescript,
}

/// TypeScript emitter options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TypeScriptTargetConfig {
    pub base_url: Option<String>,
    /// Emit package.json and tsconfig.json next to the sources.
    pub scaffold: bool,
    /// Emit mock round-trip tests for mockable operations.
    pub mocks: bool,
    /// Custom package name for package.json (defaults to the slugified
    /// root name).
    pub package_name: Option<String>,
}

impl Default for TypeScriptTargetConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            scaffold: true,
            mocks: true,
            package_name: None,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".unispec.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<UnispecConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: UnispecConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# unispec configuration, see https://github.com/unispec/unispec
input: openapi.yaml
output: generated
root_name: Api        # root name part for generated identifiers

targets:
  - typescript

typescript:
  scaffold: true      # emit package.json and tsconfig.json
  mocks: true         # emit mock round-trip tests for mockable operations
  # base_url: https://api.example.com
  # package_name: my-api-client
"#
}
