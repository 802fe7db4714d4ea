//! api-enrich CLI
//!
//! Applies the enrichment pipelines to JSON documents on disk, driven by a
//! declarative registry file describing resource types.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;

use api_enrich::{
    decorate_schema, enrich_item_response, infer_label_property, load_json, load_registry,
    read_text, DecoratorConfig, EnrichError, Enrichment, LoadError, Method, OperationsConfig,
    ResolvedOperation, SchemaDirection, DEFAULT_API_PREFIX, DEFAULT_LABEL_CANDIDATES,
};

#[derive(Parser)]
#[command(name = "api-enrich")]
#[command(about = "Enrich OpenAPI schemas and JSON-LD responses with relation and operation metadata")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge relation extensions into an input schema
    Decorate {
        /// Schema file to decorate
        schema: PathBuf,

        /// Registry file describing resource types
        #[arg(long)]
        registry: PathBuf,

        /// Type identifier the schema was built for
        #[arg(long = "type")]
        type_id: String,

        /// Schema build direction (input, output, other)
        #[arg(long, default_value = "input")]
        direction: String,

        /// API path prefix prepended to collection paths
        #[arg(long, default_value = DEFAULT_API_PREFIX)]
        api_prefix: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Append available item operations to a JSON-LD item response
    Enrich {
        /// Response body file
        response: PathBuf,

        /// Registry file describing resource types
        #[arg(long)]
        registry: PathBuf,

        /// Type identifier of the resource that produced the response
        #[arg(long = "type")]
        type_id: String,

        /// URI template of the originating operation
        #[arg(long)]
        uri_template: String,

        /// HTTP method of the originating operation
        #[arg(long, default_value = "GET")]
        method: String,

        /// Declared content type of the response
        #[arg(long, default_value = "application/ld+json")]
        content_type: String,

        /// API path prefix prepended to operation URLs
        #[arg(long, default_value = DEFAULT_API_PREFIX)]
        api_prefix: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Report on stderr why a response was left unmodified
        #[arg(long)]
        explain: bool,
    },

    /// Infer the label property for a resource type
    Label {
        /// Registry file describing resource types
        #[arg(long)]
        registry: PathBuf,

        /// Type identifier to inspect
        #[arg(long = "type")]
        type_id: String,

        /// Comma-separated candidate properties, in priority order
        #[arg(long, value_delimiter = ',')]
        candidates: Vec<String>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Enrich(#[from] EnrichError),

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Load(e) => e.exit_code(),
            CliError::Enrich(e) => e.exit_code(),
            CliError::Write { .. } => 3,
            CliError::Usage(_) => 2,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decorate {
            schema,
            registry,
            type_id,
            direction,
            api_prefix,
            output,
            pretty,
        } => run_decorate(&schema, &registry, &type_id, &direction, api_prefix, output, pretty),

        Commands::Enrich {
            response,
            registry,
            type_id,
            uri_template,
            method,
            content_type,
            api_prefix,
            output,
            pretty,
            explain,
        } => run_enrich(EnrichArgs {
            response,
            registry,
            type_id,
            uri_template,
            method,
            content_type,
            api_prefix,
            output,
            pretty,
            explain,
        }),

        Commands::Label {
            registry,
            type_id,
            candidates,
        } => run_label(&registry, &type_id, candidates),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run_decorate(
    schema_path: &Path,
    registry_path: &Path,
    type_id: &str,
    direction: &str,
    api_prefix: String,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<(), CliError> {
    let direction = SchemaDirection::parse(direction).ok_or_else(|| {
        CliError::Usage(format!(
            "unknown direction \"{direction}\": expected input, output, or other"
        ))
    })?;

    let registry = load_registry(registry_path)?;
    let schema = load_json(schema_path)?;

    let config = DecoratorConfig {
        api_prefix,
        ..DecoratorConfig::default()
    };

    let decorated = decorate_schema(&schema, type_id, direction, &registry, &registry, &config)?;

    emit_json(&decorated, output, pretty)
}

struct EnrichArgs {
    response: PathBuf,
    registry: PathBuf,
    type_id: String,
    uri_template: String,
    method: String,
    content_type: String,
    api_prefix: String,
    output: Option<PathBuf>,
    pretty: bool,
    explain: bool,
}

fn run_enrich(args: EnrichArgs) -> Result<(), CliError> {
    let method = Method::parse(&args.method).ok_or_else(|| {
        CliError::Usage(format!(
            "unknown method \"{}\": expected GET, POST, PUT, PATCH, or DELETE",
            args.method
        ))
    })?;

    let registry = load_registry(&args.registry)?;
    let body = read_text(&args.response)?;

    let operation = ResolvedOperation {
        method,
        uri_template: args.uri_template,
        resource_type: args.type_id,
    };
    let config = OperationsConfig {
        api_prefix: args.api_prefix,
        ..OperationsConfig::default()
    };

    let enrichment = enrich_item_response(
        Some(&operation),
        Some(&args.content_type),
        &body,
        &registry,
        &config,
    )?;

    let body = match enrichment {
        Enrichment::Enriched(enriched) => enriched,
        Enrichment::Skipped(reason) => {
            if args.explain {
                eprintln!("not enriched: {reason}");
            }
            body
        }
    };

    if args.pretty {
        // Pretty output only makes sense for JSON bodies; anything else is
        // passed through verbatim.
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
            return emit_json(&value, args.output, true);
        }
    }

    emit_text(&body, args.output)
}

fn run_label(
    registry_path: &Path,
    type_id: &str,
    candidates: Vec<String>,
) -> Result<(), CliError> {
    let registry = load_registry(registry_path)?;

    let candidates = if candidates.is_empty() {
        DEFAULT_LABEL_CANDIDATES
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    } else {
        candidates
    };

    let label = infer_label_property(&registry, type_id, &candidates);
    println!("{label}");
    Ok(())
}

fn emit_json(
    value: &serde_json::Value,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<(), CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|source| EnrichError::Serialize { source })
    .map_err(CliError::Enrich)?;

    emit_text(&rendered, output)
}

fn emit_text(content: &str, output: Option<PathBuf>) -> Result<(), CliError> {
    match output {
        Some(path) => std::fs::write(&path, content).map_err(|source| CliError::Write {
            path,
            source,
        }),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}
