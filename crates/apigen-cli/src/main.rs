use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use apigen_core::config::{self, ApigenConfig, CONFIG_FILE_NAME, TargetId};
use apigen_core::ir::{GenerationContext, ResourceId, TreeWarning};
use apigen_core::parse::{self, spec::Specification};
use apigen_core::render::Files;
use apigen_core::transform;
use apigen_core::{Target, generate};
use apigen_js_client::JsClientTarget;

#[derive(Parser)]
#[command(name = "apigen", about = "API description to client library generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a client library from an API description
    Generate {
        /// Path to the API description (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail when part of the resource tree could not be generated
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Print the normalized resource tree of an API description
    Inspect {
        /// Path to the API description
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new apigen configuration
    Init {
        /// Overwrite an existing config file
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
        Commands::Generate {
            input,
            output,
            deny_warnings,
        } => cmd_generate(input, output, deny_warnings),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apigen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<ApigenConfig>> {
    config::load_config(Path::new(CONFIG_FILE_NAME)).map_err(|e| anyhow::anyhow!(e))
}

fn load_spec(path: &Path) -> Result<Specification> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");
    let spec = match ext {
        "json" => parse::from_json(&content),
        _ => parse::from_yaml(&content),
    }
    .with_context(|| format!("failed to parse {}", path.display()))?;

    log::debug!(
        "loaded `{}` from {} ({} top-level resources)",
        spec.title,
        path.display(),
        spec.resources.len()
    );
    Ok(spec)
}

fn get_target(id: TargetId) -> Box<dyn Target> {
    match id {
        TargetId::JsClient => Box::new(JsClientTarget),
    }
}

/// Write generated files under `base`, creating parent directories as needed.
fn write_files(base: &Path, files: &Files) -> Result<()> {
    for (name, content) in files {
        let path = base.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn readme_content() -> &'static str {
    "# Generated Code\n\n\
     This directory was generated by [apigen](https://github.com/urmzd/apigen).\n\n\
     **Do not edit manually.** Changes will be overwritten on the next run.\n\n\
     To regenerate:\n\n\
     ```sh\n\
     apigen generate\n\
     ```\n"
}

/// Report tree warnings; with `deny` any warning is an error.
fn check_warnings(warnings: &[TreeWarning], deny: bool) -> Result<()> {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
    if deny && !warnings.is_empty() {
        anyhow::bail!(
            "{} resource tree warning(s) with --deny-warnings set",
            warnings.len()
        );
    }
    Ok(())
}

fn cmd_generate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    deny_warnings: bool,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    let spec = load_spec(&input)?;

    let target = get_target(cfg.target);
    eprintln!("Generating {} → {}", target.id(), output_dir.display());
    let generated = generate(&spec, &target.profile(), &cfg.options)?;
    check_warnings(&generated.context.warnings, deny_warnings || cfg.deny_warnings)?;

    fs::create_dir_all(&output_dir).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;
    write_files(&output_dir, &generated.files)?;

    let mut written = generated.files.len();
    if !generated.files.contains_key("README.md") {
        let readme_path = output_dir.join("README.md");
        fs::write(&readme_path, readme_content())
            .with_context(|| format!("failed to write {}", readme_path.display()))?;
        eprintln!("  wrote {}", readme_path.display());
        written += 1;
    }

    eprintln!("Generated {} files in {}", written, output_dir.display());
    eprintln!(
        "\nThe generated directory should not be edited manually, changes will be overwritten."
    );
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let spec = load_spec(&input)?;
    let strategy = get_target(cfg.target).profile().format.resolve()?;
    let ctx = transform::build_context(&spec, &strategy);

    let summary = build_inspect_summary(&ctx);

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

/// A resource's relative URIs joined from the root down.
fn full_uri(ctx: &GenerationContext, id: ResourceId) -> String {
    let mut parts = Vec::new();
    let mut current = Some(id);
    while let Some(id) = current {
        let node = &ctx.tree[id];
        parts.push(node.relative_uri.as_str());
        current = node.parent;
    }
    parts.reverse();
    let uri = parts.concat();
    if uri.is_empty() { "/".to_string() } else { uri }
}

fn build_inspect_summary(ctx: &GenerationContext) -> serde_json::Value {
    let resources: Vec<serde_json::Value> = ctx
        .all_resources
        .iter()
        .map(|&id| {
            let node = &ctx.tree[id];
            serde_json::json!({
                "id": node.id,
                "key": node.key,
                "uri": full_uri(ctx, id),
                "uri_parameters": node.uri_parameters.iter().map(|p| &p.name).collect::<Vec<_>>(),
                "methods": node.methods.keys().collect::<Vec<_>>(),
            })
        })
        .collect();

    let methods: Vec<serde_json::Value> = ctx
        .methods()
        .map(|method| {
            serde_json::json!({
                "id": method.id,
                "method": method.method,
                "uri": full_uri(ctx, method.resource),
                "resource": ctx.tree[method.resource].id,
            })
        })
        .collect();

    serde_json::json!({
        "id": ctx.id,
        "title": ctx.title,
        "version": ctx.version,
        "base_uri": ctx.base_uri,
        "security_schemes": ctx.security_schemes.keys().collect::<Vec<_>>(),
        "resources": resources,
        "methods": methods,
        "warnings": ctx.warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use apigen_core::ir::ResourceTree;

    const ORDERS: &str = r#"
title: Orders API
version: v1
baseUri: https://orders.example.com
resources:
  - relativeUri: /orders
    methods:
      - method: get
    resources:
      - relativeUri: /{orderId}
        methods:
          - method: get
          - method: delete
  - relativeUri: /{a}-{b}
    methods:
      - method: get
"#;

    fn context(source: &str) -> GenerationContext {
        let spec = parse::from_yaml(source).unwrap();
        let strategy = JsClientTarget.profile().format.resolve().unwrap();
        transform::build_context(&spec, &strategy)
    }

    #[test]
    fn test_write_files_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = Files::new();
        files.insert("index.js".to_string(), "module.exports = {}".to_string());
        files.insert("lib/util.js".to_string(), "// util".to_string());

        write_files(dir.path(), &files).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("index.js")).unwrap(),
            "module.exports = {}"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("lib/util.js")).unwrap(),
            "// util"
        );
    }

    #[test]
    fn test_load_spec_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("api.yaml");
        fs::write(&yaml, ORDERS).unwrap();
        assert_eq!(load_spec(&yaml).unwrap().title, "Orders API");

        let json = dir.path().join("api.json");
        fs::write(&json, r#"{"title": "Orders API", "resources": []}"#).unwrap();
        assert_eq!(load_spec(&json).unwrap().title, "Orders API");
    }

    #[test]
    fn test_load_spec_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_spec(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));

        assert!(load_spec(&dir.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn test_full_uri() {
        let ctx = context(ORDERS);
        let order = ctx.tree.find(&["orders", "orderId"]).unwrap();
        assert_eq!(full_uri(&ctx, order), "/orders/{0}");
        assert_eq!(full_uri(&ctx, ResourceTree::ROOT), "/");
    }

    #[test]
    fn test_inspect_summary() {
        let ctx = context(ORDERS);
        let summary = build_inspect_summary(&ctx);

        assert_eq!(summary["title"], "Orders API");
        assert_eq!(summary["resources"].as_array().unwrap().len(), 3);
        assert_eq!(summary["resources"][2]["uri_parameters"][0], "orderId");
        assert_eq!(summary["resources"][2]["methods"][1], "delete");
        assert_eq!(summary["methods"].as_array().unwrap().len(), 3);
        assert_eq!(summary["methods"][2]["method"], "delete");
        assert_eq!(summary["methods"][2]["uri"], "/orders/{0}");
        assert_eq!(summary["warnings"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_deny_warnings() {
        let ctx = context(ORDERS);
        assert!(check_warnings(&ctx.warnings, false).is_ok());
        assert!(check_warnings(&ctx.warnings, true).is_err());
        assert!(check_warnings(&[], true).is_ok());
    }

    #[test]
    fn test_readme_mentions_regeneration() {
        assert!(readme_content().contains("Do not edit manually"));
        assert!(readme_content().contains("apigen generate"));
    }
}
