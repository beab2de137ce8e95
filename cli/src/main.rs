use std::path::PathBuf;

use args_schema_core::{ArgsParser, FlagValue};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "ARGSCHEMA_LOG";

/// Output format for parsed values.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "argschema")]
#[command(about = "Validate flag schemas and parse arguments against them")]
struct Cli {
    /// Log parser activity to stderr.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a schema file.
    Validate(ValidateArgs),
    /// Parse arguments against a schema file and print the resolved values.
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema file (JSON, or YAML with a .yaml/.yml extension).
    #[arg(long)]
    schema: PathBuf,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Schema file (JSON, or YAML with a .yaml/.yml extension).
    #[arg(long)]
    schema: PathBuf,
    /// Print only this flag's value.
    #[arg(long)]
    get: Option<String>,
    /// Output format for the full value map.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Tokens to parse, given after `--`.
    #[arg(last = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Parse(args) => run_parse(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let parser = ArgsParser::from_path(&args.schema).map_err(|e| e.to_string())?;
    println!("schema OK: {} flag(s)", parser.schema().len());
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let mut parser = ArgsParser::from_path(&args.schema).map_err(|e| e.to_string())?;
    debug!(schema = %args.schema.display(), tokens = args.tokens.len(), "parsing");
    parser.parse(&args.tokens).map_err(|e| e.to_string())?;

    if let Some(name) = args.get {
        let value = parser.get_value(&name).map_err(|e| e.to_string())?;
        println!("{value}");
        return Ok(());
    }

    let values = parser.values().map_err(|e| e.to_string())?;
    println!("{}", format_values(&values, args.format)?);
    Ok(())
}

fn format_values(values: &[(&str, FlagValue)], format: OutputFormat) -> Result<String, String> {
    let map: serde_json::Map<String, serde_json::Value> = values
        .iter()
        .map(|(name, value)| {
            serde_json::to_value(value).map(|value| (name.to_string(), value))
        })
        .collect::<Result<_, _>>()
        .map_err(|e| format!("JSON serialization failed: {e}"))?;

    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&map)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(&map)
            .map(|yaml| yaml.trim_end().to_string())
            .map_err(|e| format!("YAML serialization failed: {e}")),
    }
}
