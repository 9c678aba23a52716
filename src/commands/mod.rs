/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod describe;
pub mod parse;
pub mod resolve;

use optbind::ParseError;
use optbind::schema::SchemaError;
use thiserror::Error;

use crate::cli::OutputCtx;
use crate::cli::args::Command;

/// Errors surfaced by any command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The schema could not be loaded.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The command line did not parse against the schema.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Exit code mapping for `CliError` variants.
impl CliError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Schema(_) => 3,
            Self::Parse(err) => match err {
                ParseError::HelpRequested => 0,
                ParseError::UnknownOption { .. } | ParseError::MissingValue { .. } => 2,
                ParseError::Ambiguous { .. } | ParseError::NoMatch { .. } => 4,
            },
        }
    }
}

/// Dispatch a parsed `Command` to its handler.
///
/// # Errors
///
/// Returns `CliError` on any command failure.
pub fn dispatch(command: &Command, ctx: &OutputCtx) -> Result<(), CliError> {
    match command {
        Command::Parse(args) => parse::run(args, ctx),
        Command::Describe(args) => describe::run(args, ctx),
        Command::Resolve(args) => resolve::run(args, ctx),
    }
}
