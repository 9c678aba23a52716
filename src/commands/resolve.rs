/// `resolve` command: prefix-match a single token against a value list.
use optbind::options::suggest;
use optbind::{ChoiceMatch, ChoiceTable, ParseError};

use super::CliError;
use crate::cli::OutputCtx;
use crate::cli::args::ResolveArgs;
use crate::cli::output::write_resolve;
use crate::types::ResolveOutput;

/// Run `optbind resolve`.
///
/// # Errors
///
/// Returns `CliError::Parse` when the token is ambiguous or matches nothing.
pub fn run(args: &ResolveArgs, ctx: &OutputCtx) -> Result<(), CliError> {
    let table: ChoiceTable<()> = args.values.iter().map(|v| (v.as_str(), ())).collect();
    let value = resolve_token(&table, &args.name, &args.token)?;
    write_resolve(
        &ResolveOutput {
            token: args.token.clone(),
            value,
        },
        ctx,
    );
    Ok(())
}

fn resolve_token(table: &ChoiceTable<()>, name: &str, token: &str) -> Result<String, ParseError> {
    match table.resolve(token) {
        ChoiceMatch::Matched { label, .. } => Ok(label.to_owned()),
        ChoiceMatch::Ambiguous { candidates } => Err(ParseError::Ambiguous {
            option: name.to_owned(),
            token: token.to_owned(),
            candidates,
        }),
        ChoiceMatch::NoMatch => Err(ParseError::NoMatch {
            option: name.to_owned(),
            token: token.to_owned(),
            candidates: table.labels().map(str::to_owned).collect(),
            suggestion: suggest(token, table.labels()),
        }),
    }
}
