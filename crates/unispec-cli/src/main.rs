use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use unispec_core::auth::is_authenticated;
use unispec_core::config::{self, CONFIG_FILE_NAME, TargetKind, UnispecConfig};
use unispec_core::dialect::{DialectRegistry, Document, DocumentInit};
use unispec_core::model::{Api, AuthenticationKind};
use unispec_core::schema::collect_examples;
use unispec_core::{CodeGenerator, GeneratedFile};
use unispec_typescript::{ScaffoldOptions, TypeScriptConfig, TypeScriptGenerator};

#[derive(Parser)]
#[command(name = "unispec", about = "Multi-dialect OpenAPI client generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate client code from an API description
    Generate {
        /// Path to the API description file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Validate an API description
    Validate {
        /// Path to the API description file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the canonical model built from an API description
    Inspect {
        /// Path to the API description file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new unispec configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input } => cmd_generate(input),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "unispec", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<UnispecConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Read a description file and bind it to the dialect that recognizes it.
fn load_document(path: &Path, cfg: &UnispecConfig) -> Result<Document> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let node: serde_json::Value = match ext {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?,
        _ => serde_yaml_ng::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?,
    };

    let document = DialectRegistry::standard().bind(DocumentInit {
        location: path.display().to_string(),
        node,
        configuration: cfg.document_configuration(),
    })?;
    Ok(document)
}

/// Directory one target's output lands under, inside the configured
/// output root.
fn target_directory(target: &TargetKind) -> &'static str {
    match target {
        TargetKind::Typescript => "typescript",
    }
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let handle = fs::File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut out = io::BufWriter::new(handle);
        file.write_to(&mut out)
            .with_context(|| format!("failed to write {}", path.display()))?;
        out.flush()
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

/// Generate the "do not edit" README.
fn readme_content() -> &'static str {
    r#"# Generated Code

This directory is **auto-generated** by [unispec](https://github.com/unispec/unispec).
Any manual changes will be overwritten the next time `unispec generate` is run.

To regenerate, run:
```
unispec generate
```

To customize the generated output, edit your `.unispec.yaml` configuration file.
"#
}

fn cmd_generate(input: Option<PathBuf>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let document = load_document(&input, &cfg)?;
    let api = document.api_model()?;

    if cfg.targets.is_empty() {
        eprintln!("No targets configured. Add a `targets` section to your config.");
        return Ok(());
    }

    let examples = collect_examples(document.schema_nodes());
    log::debug!("{}: {} schema examples collected", api.location, examples.len());

    for target in &cfg.targets {
        let output_dir = PathBuf::from(&cfg.output).join(target_directory(target));
        eprintln!(
            "Generating {} → {}",
            target_directory(target),
            output_dir.display()
        );

        let files = match target {
            TargetKind::Typescript => {
                let ts = &cfg.typescript;
                let generator_config = TypeScriptConfig {
                    base_url: ts.base_url.clone(),
                    mockable_schemas: examples.keys().cloned().collect(),
                    examples: examples.clone(),
                    mocks: ts.mocks,
                    scaffold: ts.scaffold.then(|| ScaffoldOptions {
                        name: cfg.root_name.clone(),
                        package_name: ts.package_name.clone(),
                        repository: None,
                        vitest: ts.mocks,
                    }),
                };
                TypeScriptGenerator
                    .generate(&api, &generator_config)
                    .map_err(|e| anyhow::anyhow!(e))?
            }
        };

        fs::create_dir_all(&output_dir).with_context(|| {
            format!("failed to create output directory {}", output_dir.display())
        })?;

        write_files(&output_dir, &files)?;

        // Add README.md
        let readme_path = output_dir.join("README.md");
        fs::write(&readme_path, readme_content())
            .with_context(|| format!("failed to write {}", readme_path.display()))?;
        eprintln!("  wrote {}", readme_path.display());

        eprintln!(
            "Generated {} files in {}",
            files.len() + 1, // +1 for README
            output_dir.display()
        );
    }

    eprintln!(
        "\nThe generated directories should not be edited manually; changes will be overwritten."
    );
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let document = load_document(&input, &cfg)?;
    let api = document.api_model()?;

    eprintln!("Valid {} document: {}", document.dialect(), api.location);
    eprintln!("  Paths: {}", api.paths.len());
    eprintln!("  Operations: {}", api.operations().count());
    eprintln!("  Authentication schemes: {}", api.authentication.len());
    eprintln!("  Named schemas: {}", api.names.len());
    eprintln!("  Routes: {}", api.routes.len());

    let declared: BTreeSet<&str> = api
        .authentication
        .iter()
        .map(|scheme| scheme.name.as_str())
        .collect();
    let no_credentials: BTreeMap<String, Option<&str>> = BTreeMap::new();

    let mut open = 0usize;
    let mut undeclared = BTreeSet::new();
    for operation in api.operations() {
        if is_authenticated(&operation.authentication_requirements, &no_credentials) {
            open += 1;
        }
        for group in &operation.authentication_requirements {
            for requirement in group {
                if !declared.contains(requirement.authentication_name.as_str()) {
                    undeclared.insert(requirement.authentication_name.clone());
                }
            }
        }
    }
    eprintln!("  Open operations: {}", open);
    eprintln!(
        "  Credentialed operations: {}",
        api.operations().count() - open
    );

    for name in &undeclared {
        eprintln!("  warning: security requirement names undeclared scheme `{}`", name);
    }
    if !undeclared.is_empty() {
        anyhow::bail!("{} undeclared scheme reference(s)", undeclared.len());
    }

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = UnispecConfig::default();
    let document = load_document(&input, &cfg)?;
    let api = document.api_model()?;

    let summary = build_inspect_summary(&document, &api);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(document: &Document, api: &Api) -> serde_json::Value {
    let no_credentials: BTreeMap<String, Option<&str>> = BTreeMap::new();

    let authentication: Vec<serde_json::Value> = api
        .authentication
        .iter()
        .map(|scheme| {
            serde_json::json!({
                "name": scheme.name,
                "kind": match &scheme.kind {
                    AuthenticationKind::ApiKey { parameter_name, location } => {
                        format!("apiKey ({} {})", location.as_str(), parameter_name)
                    }
                    AuthenticationKind::HttpBasic => "http basic".to_string(),
                    AuthenticationKind::HttpBearer => "http bearer".to_string(),
                },
            })
        })
        .collect();

    let paths: Vec<serde_json::Value> = api
        .paths
        .iter()
        .map(|path| {
            let operations: Vec<serde_json::Value> = path
                .operations
                .iter()
                .map(|operation| {
                    let results: Vec<serde_json::Value> = operation
                        .results
                        .iter()
                        .map(|result| {
                            serde_json::json!({
                                "status": result.status_kind,
                                "claimed_codes": result.status_codes.len(),
                                "bodies": result
                                    .bodies
                                    .iter()
                                    .map(|body| body.content_type.as_str())
                                    .collect::<Vec<_>>(),
                            })
                        })
                        .collect();
                    serde_json::json!({
                        "name": operation.name.camel_case,
                        "method": operation.method.as_str(),
                        "deprecated": operation.deprecated,
                        "parameters": operation.parameters().count(),
                        "bodies": operation.bodies.len(),
                        "results": results,
                        "open": is_authenticated(
                            &operation.authentication_requirements,
                            &no_credentials,
                        ),
                    })
                })
                .collect();
            serde_json::json!({
                "id": path.id,
                "pattern": path.pattern,
                "operations": operations,
            })
        })
        .collect();

    serde_json::json!({
        "location": api.location,
        "dialect": document.dialect(),
        "name": api.name.pascal_case,
        "routes": api.routes.len(),
        "authentication": authentication,
        "schemas": api
            .names
            .iter()
            .map(|(id, name)| serde_json::json!({ "id": id, "name": name.pascal_case }))
            .collect::<Vec<_>>(),
        "paths": paths,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
