//! # modelmeta CLI
//!
//! Loads a model metadata file, validates it and prints the normalized
//! document, or reads a single nested value from it.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use modelmeta_core::{document, get_value_by_path, InvalidModelSchema, ModelSchema, SchemaMode};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Validate and normalize model deployment metadata.
#[derive(Parser, Debug)]
#[command(name = "modelmeta", version, about)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a metadata file and print it with defaults filled in.
    Validate {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = Mode::Auto)]
        mode: Mode,
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Print the value at a dotted key path, e.g. `settings.name`.
    Get {
        file: PathBuf,
        path: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Single,
    Multi,
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

/// What a command produced, mapped to an exit code by `main`.
#[derive(Debug)]
enum Outcome {
    Printed(String),
    Invalid(InvalidModelSchema),
    NotFound(String),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render(value: &Value, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Json => serde_json::to_string_pretty(value)? + "\n",
    };
    Ok(rendered)
}

fn load(file: &Path) -> anyhow::Result<Value> {
    document::from_file(file).with_context(|| format!("loading {}", file.display()))
}

fn validate(file: &Path, mode: Mode, format: OutputFormat) -> anyhow::Result<Outcome> {
    let metadata = load(file)?;
    let mode = match mode {
        Mode::Single => SchemaMode::Single,
        Mode::Multi => SchemaMode::Multi,
        Mode::Auto => SchemaMode::detect(&metadata),
    };
    tracing::info!(file = %file.display(), ?mode, "Validating model metadata");

    match ModelSchema::new().validate_and_transform_mode(&metadata, mode) {
        Ok(normalized) => Ok(Outcome::Printed(render(&normalized, format)?)),
        Err(e) => Ok(Outcome::Invalid(e)),
    }
}

fn get(file: &Path, path: &str, format: OutputFormat) -> anyhow::Result<Outcome> {
    let metadata = load(file)?;
    match get_value_by_path(&metadata, path) {
        Some(value) => Ok(Outcome::Printed(render(value, format)?)),
        None => Ok(Outcome::NotFound(path.to_string())),
    }
}

fn run(command: &Commands) -> anyhow::Result<Outcome> {
    match command {
        Commands::Validate { file, mode, format } => validate(file, *mode, *format),
        Commands::Get { file, path, format } => get(file, path, *format),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli.command) {
        Ok(Outcome::Printed(output)) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Ok(Outcome::Invalid(e)) => {
            eprintln!("invalid model metadata: {} (code {})", e, e.code());
            ExitCode::from(1)
        }
        Ok(Outcome::NotFound(path)) => {
            eprintln!("no value at '{}'", path);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BINARY_METADATA: &str = r#"
git_datarobot_model_id: abc123
target_type: Binary
target_name: target_column
positive_class_label: "1"
negative_class_label: "0"
settings:
  name: My Awesome Model
  description: Binary classifier
version:
  model_environment: 627785ea562155d227c6a56c
"#;

    fn metadata_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_cli_parses_validate_defaults() {
        let cli = Cli::try_parse_from(["modelmeta", "validate", "model-metadata.yaml"]).unwrap();
        match cli.command {
            Commands::Validate { mode, format, .. } => {
                assert_eq!(mode, Mode::Auto);
                assert_eq!(format, OutputFormat::Yaml);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_validate_prints_normalized_document() {
        let file = metadata_file(BINARY_METADATA);
        let outcome = validate(file.path(), Mode::Single, OutputFormat::Json).unwrap();
        let output = match outcome {
            Outcome::Printed(output) => output,
            other => panic!("expected printed output, got {:?}", other),
        };
        let printed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(printed["version"]["exclude_glob_pattern"], serde_json::json!([]));
    }

    #[test]
    fn test_validate_reports_invalid_metadata() {
        let file = metadata_file(&BINARY_METADATA.replace("negative_class_label: \"0\"\n", ""));
        let outcome = validate(file.path(), Mode::Auto, OutputFormat::Yaml).unwrap();
        match outcome {
            Outcome::Invalid(e) => assert_eq!(e.message(), "Missing key: 'negative_class_label'"),
            other => panic!("expected invalid outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_multi_mode_on_single_document() {
        let file = metadata_file(BINARY_METADATA);
        let outcome = validate(file.path(), Mode::Multi, OutputFormat::Yaml).unwrap();
        assert!(matches!(outcome, Outcome::Invalid(_)));
    }

    #[test]
    fn test_get_nested_value() {
        let file = metadata_file(BINARY_METADATA);
        let outcome = get(file.path(), "settings.description", OutputFormat::Json).unwrap();
        assert!(matches!(outcome, Outcome::Printed(ref s) if s == "\"Binary classifier\"\n"));

        let outcome = get(file.path(), "settings.missing", OutputFormat::Json).unwrap();
        assert!(matches!(outcome, Outcome::NotFound(ref p) if p == "settings.missing"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = validate(Path::new("/nonexistent.yaml"), Mode::Auto, OutputFormat::Yaml);
        assert!(result.is_err());
    }
}
