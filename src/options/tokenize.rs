/// Split an argument vector into option/value pairs and positionals.
///
/// Grammar: `[ -short VALUE | --long VALUE | --long=VALUE | POSITIONAL ]* [ -- POSITIONAL* ]`.
///
/// Every option takes exactly one value, even booleans, and the token after
/// a flag is always its value regardless of leading dashes. A single dash
/// tries the alias before the long name. Pairs are applied in order, so the
/// last occurrence of an option wins.
use log::debug;

use super::errors::ParseError;
use super::registry::OptionRegistry;

/// What remains after all options were applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Tokens not consumed by an option, in order.
    pub positional: Vec<String>,
    /// Long names of the options applied, in order, repeats included.
    pub applied: Vec<String>,
}

impl OptionRegistry<'_> {
    /// Apply every option in `args` and collect the positionals.
    ///
    /// `args` must not include the program name.
    ///
    /// # Errors
    ///
    /// - `ParseError::HelpRequested` — `-h`/`--help` given and not registered
    /// - `ParseError::UnknownOption` — a flag names no registered option
    /// - `ParseError::MissingValue` — a flag is the last token
    /// - `ParseError::Ambiguous` / `ParseError::NoMatch` — an enum value
    ///   could not be resolved
    pub fn parse_args<I, S>(&mut self, args: I) -> Result<ParsedArgs, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = ParsedArgs::default();
        let mut args = args.into_iter();
        let mut options_done = false;

        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            if options_done {
                parsed.positional.push(arg.to_owned());
                continue;
            }
            if arg == "--" {
                options_done = true;
                continue;
            }

            let (flag, name, inline) = if let Some(rest) = arg.strip_prefix("--") {
                let (name, inline) = match rest.split_once('=') {
                    Some((name, value)) => (name, Some(value)),
                    None => (rest, None),
                };
                let flag = &arg[..2 + name.len()];
                (flag, self.get(name).map(|info| info.name.clone()), inline)
            } else if arg.len() > 1 && arg.starts_with('-') {
                (arg, self.resolve(&arg[1..]).map(str::to_owned), None)
            } else {
                parsed.positional.push(arg.to_owned());
                continue;
            };

            let Some(name) = name else {
                if flag == "-h" || flag == "--help" {
                    return Err(ParseError::HelpRequested);
                }
                return Err(ParseError::UnknownOption {
                    flag: flag.to_owned(),
                    suggestion: self.suggest_name(flag.trim_start_matches('-')),
                });
            };

            let value = match inline {
                Some(value) => value.to_owned(),
                None => match args.next() {
                    Some(value) => value.as_ref().to_owned(),
                    None => {
                        return Err(ParseError::MissingValue {
                            flag: flag.to_owned(),
                        });
                    }
                },
            };

            self.apply(&name, &value)?;
            parsed.applied.push(name);
        }

        debug!(
            "parsed {} option(s), {} positional(s)",
            parsed.applied.len(),
            parsed.positional.len()
        );
        Ok(parsed)
    }
}
