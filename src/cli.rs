use crate::config::{ConfigUpdate, GeneratorConfig};
use crate::docs::DocCommentParser;
use crate::openapi_builder::OpenApiBuilder;
use crate::router::host;
use crate::serializer::{load_document, serialize_json, serialize_yaml, write_to_file};
use crate::validator::{document_stats, validate_document};
use crate::walker::{DiscoveryOptions, RouteRecord, RouteWalker};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Generate OpenAPI documents from a web application's router tree
#[derive(Parser, Debug)]
#[command(name = "openapi-from-router")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a document from a router dump
    Generate(GenerateArgs),
    /// Check an existing OpenAPI document
    Validate {
        /// OpenAPI document (JSON or YAML)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print counts for an existing OpenAPI document
    Stats {
        /// OpenAPI document (JSON or YAML)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Router dump exported by the application (JSON or YAML)
    #[arg(value_name = "ROUTER_DUMP")]
    pub router_dump: PathBuf,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Output format (yaml or json)
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub output_format: OutputFormat,

    /// Generator configuration file (JSON or YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Source directory whose doc comments document the routes
    #[arg(long = "docs", value_name = "DIR")]
    pub docs: Option<PathBuf>,

    /// API title
    #[arg(long)]
    pub title: Option<String>,

    /// API version
    #[arg(long = "api-version", value_name = "VERSION")]
    pub api_version: Option<String>,

    /// API description
    #[arg(long)]
    pub description: Option<String>,

    /// Derive path parameters from `:name` markers
    #[arg(long = "extract-params")]
    pub extract_params: bool,

    /// Record generated operation ids
    #[arg(long = "operation-ids")]
    pub operation_ids: bool,

    /// Record the middleware chain of every route
    #[arg(long = "analyze-middleware")]
    pub analyze_middleware: bool,

    /// Tag added to every operation (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Write `{name}` path templates instead of `:name` markers
    #[arg(long = "path-templates")]
    pub path_templates: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    match &args.command {
        Command::Generate(generate) => {
            require_file(&generate.router_dump, "Router dump")?;
            if let Some(config) = &generate.config {
                require_file(config, "Config file")?;
            }
            if let Some(docs) = &generate.docs {
                if !docs.is_dir() {
                    anyhow::bail!("Docs path is not a directory: {}", docs.display());
                }
            }
            info!("Router dump: {}", generate.router_dump.display());
            info!("Output format: {:?}", generate.output_format);
            match &generate.output_path {
                Some(output) => info!("Output file: {}", output.display()),
                None => info!("Output: stdout"),
            }
        }
        Command::Validate { file } | Command::Stats { file } => require_file(file, "Document")?,
    }

    Ok(args)
}

fn require_file(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("{} does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        anyhow::bail!("{} is not a file: {}", what, path.display());
    }
    Ok(())
}

/// Run the selected subcommand
pub fn run(args: CliArgs) -> Result<()> {
    match args.command {
        Command::Generate(generate) => run_generate(&generate),
        Command::Validate { file } => run_validate(&file),
        Command::Stats { file } => run_stats(&file),
    }
}

fn run_generate(args: &GenerateArgs) -> Result<()> {
    info!("Starting OpenAPI document generation...");

    // Step 1: Configuration, then command-line overrides
    let config = match &args.config {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    let update = config_update(args, &config);

    // Step 2: Router dump
    let dump = load_document(&args.router_dump)
        .with_context(|| format!("Failed to load router dump: {}", args.router_dump.display()))?;
    let tree = host::from_value(&dump);
    if tree.is_none() {
        warn!("Router dump has no recognizable router stack");
    }

    // Step 3: Discovery
    let options = DiscoveryOptions {
        parse_docs: args.docs.is_some(),
        extract_parameters: args.extract_params,
        analyze_middleware: args.analyze_middleware,
        generate_operation_ids: args.operation_ids,
        custom_tags: args.tags.clone(),
    };
    let mut walker = RouteWalker::with_options(options);
    if let Some(docs) = &args.docs {
        info!("Reading documentation from {}", docs.display());
        walker = walker.with_doc_source(Box::new(DocCommentParser::new(docs.clone())));
    }

    let routes = walker.discover(tree.as_ref());
    if routes.is_empty() {
        warn!("No routes found in the router dump");
    }

    let records: Vec<RouteRecord> = if walker.enriched_routes().is_empty() {
        routes
    } else {
        for enriched in walker.enriched_routes() {
            if !enriched.middleware.is_empty() {
                debug!(
                    "{} {} runs behind {}",
                    enriched.route.method,
                    enriched.route.path,
                    enriched.middleware.join(" -> ")
                );
            }
        }
        walker
            .enriched_routes()
            .iter()
            .map(|enriched| enriched.to_route_record())
            .collect()
    };

    // Step 4: Assembly
    let mut builder = OpenApiBuilder::new(config);
    builder.update_config(update);
    let document = builder.generate(&records);

    // Step 5: Serialize to requested format
    info!("Serializing to {:?} format...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Yaml => serialize_yaml(&document)?,
        OutputFormat::Json => serialize_json(&document)?,
    };

    if let Some(output_path) = &args.output_path {
        write_to_file(&content, output_path)?;
        info!("Successfully wrote OpenAPI document to {}", output_path.display());
    } else {
        println!("{}", content);
    }

    let documented = walker.enriched_routes().iter().filter(|r| r.documented).count();
    info!("Summary:");
    info!("  - Routes found: {}", records.len());
    info!("  - Paths: {}", document.paths.len());
    if args.docs.is_some() && !walker.enriched_routes().is_empty() {
        info!("  - Documented routes: {}", documented);
    }

    Ok(())
}

/// Command-line overrides as a shallow config update
fn config_update(args: &GenerateArgs, config: &GeneratorConfig) -> ConfigUpdate {
    let mut update = ConfigUpdate::default();

    if args.title.is_some() || args.api_version.is_some() || args.description.is_some() {
        let mut info = config.info.clone();
        if let Some(title) = &args.title {
            info.title = title.clone();
        }
        if let Some(version) = &args.api_version {
            info.version = version.clone();
        }
        if let Some(description) = &args.description {
            info.description = Some(description.clone());
        }
        update.info = Some(info);
    }
    if args.path_templates {
        update.path_templates = Some(true);
    }

    update
}

fn run_validate(file: &Path) -> Result<()> {
    let document = load_document(file)
        .with_context(|| format!("Failed to load document: {}", file.display()))?;
    let report = validate_document(&document);

    for warning in &report.warnings {
        println!("warning: {}", warning);
    }
    for error in &report.errors {
        println!("error: {}", error);
    }

    if !report.is_valid() {
        anyhow::bail!(
            "{} is invalid: {} errors, {} warnings",
            file.display(),
            report.errors.len(),
            report.warnings.len()
        );
    }

    info!("{} is valid ({} warnings)", file.display(), report.warnings.len());
    Ok(())
}

fn run_stats(file: &Path) -> Result<()> {
    let document = load_document(file)
        .with_context(|| format!("Failed to load document: {}", file.display()))?;
    println!("{}", document_stats(&document));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn generate_args(argv: &[&str]) -> GenerateArgs {
        let mut full = vec!["openapi-from-router", "generate"];
        full.extend_from_slice(argv);
        match CliArgs::try_parse_from(full).unwrap().command {
            Command::Generate(args) => args,
            other => panic!("expected generate, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_generate_flags() {
        let args = generate_args(&[
            "dump.json",
            "-f",
            "json",
            "--api-version",
            "2.0.0",
            "--tag",
            "public",
            "--tag",
            "v2",
            "--extract-params",
        ]);

        assert_eq!(args.router_dump, PathBuf::from("dump.json"));
        assert!(matches!(args.output_format, OutputFormat::Json));
        assert_eq!(args.api_version.as_deref(), Some("2.0.0"));
        assert_eq!(args.tags, vec!["public", "v2"]);
        assert!(args.extract_params);
        assert!(!args.path_templates);
    }

    #[test]
    fn test_verbose_is_global() {
        let args = CliArgs::try_parse_from(["openapi-from-router", "stats", "a.json", "-v"]).unwrap();
        assert!(args.verbose);
    }

    #[test]
    fn test_config_update_keeps_unset_info_fields() {
        let args = generate_args(&["dump.json", "--title", "Accounts", "--path-templates"]);
        let config = GeneratorConfig::default();

        let update = config_update(&args, &config);

        let info = update.info.unwrap();
        assert_eq!(info.title, "Accounts");
        assert_eq!(info.version, "1.0.0");
        assert_eq!(update.path_templates, Some(true));
        assert!(update.spec_version.is_none());
    }

    #[test]
    fn test_no_overrides_means_empty_update() {
        let args = generate_args(&["dump.json"]);
        assert_eq!(
            config_update(&args, &GeneratorConfig::default()),
            ConfigUpdate::default()
        );
    }

    #[test]
    fn test_missing_input_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");
        let args = CliArgs::try_parse_from([
            "openapi-from-router".to_string(),
            "validate".to_string(),
            missing.display().to_string(),
        ])
        .unwrap();

        assert!(parse_args_from_parsed(args).is_err());
    }

    #[test]
    fn test_generate_writes_document() {
        let temp_dir = TempDir::new().unwrap();
        let dump = temp_dir.path().join("dump.json");
        fs::write(
            &dump,
            r#"{ "router": { "stack": [
                { "route": { "path": "/users/:id", "methods": { "get": true },
                             "stack": [{ "method": "get", "handle": { "name": "getUser" } }] } }
            ] } }"#,
        )
        .unwrap();
        let output = temp_dir.path().join("out").join("openapi.json");

        let args = generate_args(&[
            dump.to_str().unwrap(),
            "-f",
            "json",
            "-o",
            output.to_str().unwrap(),
            "--path-templates",
            "--title",
            "Users",
        ]);
        run_generate(&args).unwrap();

        let written = load_document(&output).unwrap();
        assert_eq!(written["info"]["title"], "Users");
        assert_eq!(
            written["paths"]["/users/{id}"]["get"]["operationId"],
            "get_users_id"
        );
        assert!(run_validate(&output).is_ok());
    }

    #[test]
    fn test_validate_fails_on_invalid_document() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("openapi.yaml");
        fs::write(&file, "openapi: 3.1.0\ninfo:\n  title: t\n").unwrap();

        assert!(run_validate(&file).is_err());
        assert!(run_stats(&file).is_ok());
    }
}
