/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// optbind — parse command lines against a JSON option schema.
#[derive(Debug, Parser)]
#[command(
    name = "optbind",
    about = "Parse command lines against a JSON option schema",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output format. Auto-detects: table when TTY, json when piped.
    #[arg(long, global = true, value_name = "FORMAT", default_value = "auto")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, global = true, conflicts_with = "output")]
    pub json: bool,

    /// Omit table headers (useful for awk/cut processing).
    #[arg(long, global = true)]
    pub no_header: bool,

    /// Log registration, parsing and timing details to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Auto-detect: table when stdout is a TTY, json when piped.
    #[default]
    Auto,
    /// JSON object (pretty-printed).
    Json,
    /// Compact single-line JSON.
    Compact,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
    /// Aligned table with headers (human-readable).
    Table,
    /// `NAME='value'` assignments and `set --` for positionals, for `eval`.
    Shell,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse arguments against a schema and print the resulting values.
    Parse(ParseArgs),
    /// Print the help text a schema declares.
    Describe(DescribeArgs),
    /// Resolve a token against a list of values by unambiguous prefix.
    Resolve(ResolveArgs),
}

/// Arguments for `optbind parse`.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// JSON schema declaring the options.
    #[arg(long, short, value_name = "FILE")]
    pub schema: PathBuf,

    /// Command line to parse, without the program name. Put it after `--`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Arguments for `optbind describe`.
#[derive(Debug, Parser)]
pub struct DescribeArgs {
    /// JSON schema declaring the options.
    #[arg(long, short, value_name = "FILE")]
    pub schema: PathBuf,
}

/// Arguments for `optbind resolve`.
#[derive(Debug, Parser)]
pub struct ResolveArgs {
    /// Token to resolve, e.g. "ser".
    pub token: String,

    /// Permitted values, in precedence order.
    #[arg(required = true, value_name = "VALUES")]
    pub values: Vec<String>,

    /// Option name used in error messages.
    #[arg(long, value_name = "NAME", default_value = "value")]
    pub name: String,
}
