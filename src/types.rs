/// Shared serializable output types for all commands.
///
/// These types are what gets written to stdout — either as JSON or rendered
/// as a table. They are decoupled from the library's `OptionInfo` and `Slot`.
use optbind::schema::Slot;
use serde::{Deserialize, Serialize};

use crate::commands::CliError;

/// One option after parsing.
#[derive(Debug, Clone, Serialize)]
pub struct OptionValueOutput {
    /// Long name.
    pub name: String,
    /// Alias, or null.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Typed value (bool, number or string).
    pub value: Slot,
    /// Canonical string form of the value.
    pub current: String,
    /// Default in canonical form.
    pub default: String,
    /// Whether the command line set this option.
    pub set: bool,
}

/// Result of `optbind parse`.
#[derive(Debug, Clone, Serialize)]
pub struct ParseOutput {
    /// Every declared option, in name order.
    pub options: Vec<OptionValueOutput>,
    /// Positional arguments, in order.
    pub positional: Vec<String>,
}

/// Result of `optbind resolve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveOutput {
    /// The token as given.
    pub token: String,
    /// The full value it selected.
    pub value: String,
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional list of candidates (for ambiguous or unmatched values).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<String>>,
}

impl ErrorOutput {
    /// Construct from a `CliError`.
    #[must_use]
    pub fn from_cli_error(err: &CliError) -> Self {
        use optbind::ParseError;

        let code = match err {
            CliError::Schema(_) => "invalid_schema",
            CliError::Parse(parse) => match parse {
                ParseError::Ambiguous { .. } => "ambiguous_value",
                ParseError::NoMatch { .. } => "invalid_value",
                ParseError::UnknownOption { .. } => "unknown_option",
                ParseError::MissingValue { .. } => "missing_value",
                ParseError::HelpRequested => "help_requested",
            },
        };
        let candidates = match err {
            CliError::Parse(parse) => parse.candidates().map(<[String]>::to_vec),
            CliError::Schema(_) => None,
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: code.to_owned(),
                message: err.to_string(),
                candidates,
            },
        }
    }
}
