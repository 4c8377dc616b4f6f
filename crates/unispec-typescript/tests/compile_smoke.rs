use std::fs;
use std::process::Command;

use unispec_core::CodeGenerator;
use unispec_core::dialect::{DialectRegistry, DocumentInit};
use unispec_core::schema::collect_examples;
use unispec_typescript::{TypeScriptConfig, TypeScriptGenerator};

const PETSTORE: &str = include_str!("fixtures/petstore-30.yaml");

#[test]
#[ignore] // Requires Node.js + TypeScript installed
fn generated_typescript_compiles() {
    let node: serde_json::Value = serde_yaml_ng::from_str(PETSTORE).unwrap();
    let document = DialectRegistry::standard()
        .bind(DocumentInit {
            location: "petstore-30.yaml".to_string(),
            node,
            configuration: Default::default(),
        })
        .unwrap();
    let api = document.api_model().unwrap();

    let examples = collect_examples(document.schema_nodes());
    let config = TypeScriptConfig {
        mockable_schemas: examples.keys().cloned().collect(),
        examples,
        ..TypeScriptConfig::default()
    };
    let files = TypeScriptGenerator.generate(&api, &config).unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();

    // Write generated files
    for file in &files {
        let mut out = fs::File::create(dir.join(&file.path)).unwrap();
        file.write_to(&mut out).unwrap();
    }

    // Write tsconfig
    let tsconfig = r#"{
  "compilerOptions": {
    "strict": true,
    "target": "ES2022",
    "module": "ESNext",
    "moduleResolution": "bundler",
    "lib": ["ES2022", "DOM", "DOM.Iterable"],
    "noEmit": true,
    "skipLibCheck": true
  },
  "include": ["*.ts"]
}"#;
    fs::write(dir.join("tsconfig.json"), tsconfig).unwrap();

    // Run tsc
    let output = Command::new("npx")
        .args(["tsc", "--noEmit"])
        .current_dir(dir)
        .output()
        .expect("failed to run tsc");

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!(
            "TypeScript compilation failed:\nstdout: {}\nstderr: {}",
            stdout, stderr
        );
    }
}
