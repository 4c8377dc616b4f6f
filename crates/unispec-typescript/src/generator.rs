use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;
use unispec_core::model::Api;
use unispec_core::{CodeGenerator, GeneratedFile};

use crate::emitters;
use crate::emitters::scaffold::ScaffoldOptions;

#[derive(Debug, Error)]
pub enum TypeScriptError {
    #[error("template render failed: {0}")]
    Render(String),
}

/// Configuration for the TypeScript generator.
#[derive(Debug, Clone, Default)]
pub struct TypeScriptConfig {
    /// Base URL baked into the client constructor default.
    pub base_url: Option<String>,
    /// Schema identifiers an example value is known for. Operations are
    /// only mocked when mockable with respect to this set.
    pub mockable_schemas: BTreeSet<String>,
    /// Example values by schema identifier, used to synthesize mock call
    /// arguments and response payloads.
    pub examples: IndexMap<String, Value>,
    /// Emit `mocks.test.ts` for the mockable operations.
    pub mocks: bool,
    /// Generate scaffold files (package.json, tsconfig.json).
    pub scaffold: Option<ScaffoldOptions>,
}

/// TypeScript code generator.
pub struct TypeScriptGenerator;

impl CodeGenerator for TypeScriptGenerator {
    type Config = TypeScriptConfig;
    type Error = TypeScriptError;

    fn generate(
        &self,
        api: &Api,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error> {
        let mut files = vec![
            GeneratedFile {
                path: "types.ts".to_string(),
                content: emitters::types::emit_types(api),
            },
            GeneratedFile {
                path: "client.ts".to_string(),
                content: emitters::client::emit_client(api, config),
            },
        ];

        if config.mocks {
            match emitters::mock_tests::emit_mock_tests(api, config) {
                Some(content) => files.push(GeneratedFile {
                    path: "mocks.test.ts".to_string(),
                    content,
                }),
                None => log::debug!("{}: no mockable operations, skipping mocks", api.location),
            }
        }

        if let Some(ref scaffold) = config.scaffold {
            files.extend(emitters::scaffold::emit_scaffold(scaffold));
        }

        Ok(files)
    }
}
