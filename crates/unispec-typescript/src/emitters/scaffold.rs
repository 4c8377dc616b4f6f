use minijinja::{Environment, context};
use unispec_core::GeneratedFile;

/// Options controlling which scaffold files to generate.
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// Project name, used as fallback for the package name.
    pub name: String,
    /// Custom package name override (if None, derives from the name).
    pub package_name: Option<String>,
    /// Repository URL for package.json.
    pub repository: Option<String>,
    /// Wire vitest into package.json scripts and dev dependencies.
    pub vitest: bool,
}

/// Generate project scaffold files (package.json, tsconfig.json).
pub fn emit_scaffold(options: &ScaffoldOptions) -> Vec<GeneratedFile> {
    vec![
        GeneratedFile {
            path: "package.json".to_string(),
            content: emit_package_json(options).into(),
        },
        GeneratedFile {
            path: "tsconfig.json".to_string(),
            content: emit_tsconfig().into(),
        },
    ]
}

fn emit_package_json(options: &ScaffoldOptions) -> String {
    let mut env = Environment::new();
    env.add_template(
        "package.json.j2",
        include_str!("../../templates/package.json.j2"),
    )
    .expect("template should be valid");
    let tmpl = env.get_template("package.json.j2").unwrap();

    let pkg_name = options
        .package_name
        .clone()
        .unwrap_or_else(|| slugify(&options.name));

    tmpl.render(context! {
        name => pkg_name,
        repository => options.repository,
        vitest => options.vitest,
    })
    .expect("render should succeed")
}

fn emit_tsconfig() -> String {
    include_str!("../../templates/tsconfig.json.j2").to_string()
}

/// Convert a project name to a kebab-case package name.
fn slugify(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();

    // Collapse consecutive dashes and trim
    let mut result = String::new();
    let mut prev_dash = false;
    for c in slug.chars() {
        if c == '-' {
            if !prev_dash && !result.is_empty() {
                result.push('-');
            }
            prev_dash = true;
        } else {
            result.push(c);
            prev_dash = false;
        }
    }

    result.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My API Service"), "my-api-service");
        assert_eq!(slugify("Petstore - OpenAPI 3.0"), "petstore-openapi-3-0");
        assert_eq!(slugify("petstore"), "petstore");
    }

    #[test]
    fn test_emit_scaffold_files() {
        let options = ScaffoldOptions {
            name: "Test API".to_string(),
            package_name: None,
            repository: Some("https://github.com/test/repo".to_string()),
            vitest: true,
        };
        let files = emit_scaffold(&options);
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.path == "package.json"));
        assert!(files.iter().any(|f| f.path == "tsconfig.json"));

        let package = files[0].content.to_string();
        assert!(package.contains("\"test-api\""));
        assert!(package.contains("https://github.com/test/repo"));
        assert!(package.contains("vitest"));
    }

    #[test]
    fn test_package_name_override_wins() {
        let options = ScaffoldOptions {
            name: "Test API".to_string(),
            package_name: Some("@acme/pets".to_string()),
            repository: None,
            vitest: false,
        };
        let package = emit_package_json(&options);
        assert!(package.contains("\"@acme/pets\""));
        assert!(!package.contains("repository"));
        assert!(!package.contains("vitest"));
    }
}
