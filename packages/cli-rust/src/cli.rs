//! Command-line arguments. Every option can also come from the environment.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Inspect the field paths of JSON documents, with or without a schema.
#[derive(Parser, Debug)]
#[command(name = "smd", version)]
pub struct Cli {
    /// Log output format (logs go to stderr; filter with RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "SMD_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the leaf field paths of a document, guessing list keys
    Paths(PathsArgs),
    /// Validate a document against a schema type
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
pub struct PathsArgs {
    /// JSON document to decompose
    pub input: PathBuf,

    /// Field name that marks a list element as keyed; repeat or comma-separate
    /// for several. Defaults to key, id, name.
    #[arg(long = "candidate-key", env = "SMD_CANDIDATE_KEYS", value_delimiter = ',')]
    pub candidate_keys: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON document to validate
    pub input: PathBuf,

    /// JSON schema file (`{"types": {...}}`)
    #[arg(long, env = "SMD_SCHEMA")]
    pub schema: PathBuf,

    /// Name of the schema type the document should conform to
    #[arg(long = "type", env = "SMD_TYPE")]
    pub type_name: String,

    /// Print the leaf field paths once the document validates
    #[arg(long)]
    pub leaves: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
