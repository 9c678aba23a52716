/// `parse` command: apply a command line to a schema's options.
use optbind::options::render_help;
use optbind::schema::Schema;
use optbind::{OptionInfo, ParseError};

use super::CliError;
use crate::cli::OutputCtx;
use crate::cli::args::ParseArgs;
use crate::cli::output::{write_help, write_parse_output};
use crate::types::{OptionValueOutput, ParseOutput};

/// What a command line evaluates to against a schema.
#[derive(Debug)]
pub enum Evaluation {
    /// The arguments parsed; every declared option with its value.
    Values(ParseOutput),
    /// The arguments asked for help.
    Help {
        /// Rendered help text.
        text: String,
        /// Option metadata, for the structured formats.
        options: Vec<OptionInfo>,
    },
}

/// Run `optbind parse`.
///
/// `-h`/`--help` in the parsed arguments prints the schema's help instead,
/// unless the schema declares an option by that name.
///
/// # Errors
///
/// Returns `CliError::Schema` if the schema cannot be loaded and
/// `CliError::Parse` if the arguments do not parse.
pub fn run(args: &ParseArgs, ctx: &OutputCtx) -> Result<(), CliError> {
    let _t_load = ctx.timer("load_schema");
    let schema = Schema::load(&args.schema)?;
    drop(_t_load);

    let _t_parse = ctx.timer("parse_args");
    let evaluation = evaluate(&schema, &args.args)?;
    drop(_t_parse);

    match evaluation {
        Evaluation::Values(output) => write_parse_output(&output, ctx),
        Evaluation::Help { text, options } => {
            let options: Vec<&OptionInfo> = options.iter().collect();
            write_help(&text, &options, ctx);
        }
    }
    Ok(())
}

/// Bind fresh slots for `schema` and parse `args` into them.
///
/// # Errors
///
/// Returns the first `ParseError` other than a help request.
pub fn evaluate(schema: &Schema, args: &[String]) -> Result<Evaluation, ParseError> {
    let mut slots = schema.slots();
    let (parsed, infos) = {
        let mut registry = schema.bind(&mut slots);
        match registry.parse_args(args) {
            Ok(parsed) => (parsed, registry.options().cloned().collect::<Vec<_>>()),
            Err(ParseError::HelpRequested) => {
                return Ok(Evaluation::Help {
                    text: render_help(&schema.program, schema.about.as_deref(), &registry, false),
                    options: registry.options().cloned().collect(),
                });
            }
            Err(err) => return Err(err),
        }
    };

    let options = infos
        .into_iter()
        .filter_map(|info| {
            // Duplicate declarations bind only the last slot.
            let index = schema.options.iter().rposition(|spec| spec.name == info.name)?;
            Some(OptionValueOutput {
                set: parsed.applied.contains(&info.name),
                value: slots[index].clone(),
                name: info.name,
                short_name: info.short_name,
                current: info.current_value,
                default: info.default_value,
            })
        })
        .collect();

    Ok(Evaluation::Values(ParseOutput {
        options,
        positional: parsed.positional,
    }))
}

#[cfg(test)]
mod tests {
    use optbind::schema::Slot;

    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| (*s).to_owned()).collect()
    }

    fn values(evaluation: Evaluation) -> ParseOutput {
        match evaluation {
            Evaluation::Values(output) => output,
            Evaluation::Help { .. } => panic!("expected values, got help"),
        }
    }

    #[test]
    fn test_duplicate_declaration_reports_last_slot() {
        let schema = Schema::from_json(
            r#"{"program": "p", "options": [
                {"name": "level", "type": "int", "default": "3"},
                {"name": "jobs", "short": "j", "type": "uint"},
                {"name": "level", "type": "enum", "values": ["low", "high"]}
            ]}"#,
        )
        .unwrap();

        let output = values(evaluate(&schema, &argv(&["--level", "hi", "rest"])).unwrap());
        assert_eq!(output.positional, ["rest"]);
        assert_eq!(output.options.len(), 2);

        let level = output.options.iter().find(|o| o.name == "level").unwrap();
        assert_eq!(level.value, Slot::Choice("high".to_owned()));
        assert_eq!(level.current, "high");
        assert_eq!(level.default, "low");
        assert!(level.set);

        let jobs = output.options.iter().find(|o| o.name == "jobs").unwrap();
        assert_eq!(jobs.value, Slot::Uint(0));
        assert!(!jobs.set);
    }

    #[test]
    fn test_help_request_renders_schema_help() {
        let schema = Schema::from_json(
            r#"{"program": "render", "about": "Render a scene.", "options": [
                {"name": "mode", "short": "m", "type": "enum", "values": ["serial", "parallel"]}
            ]}"#,
        )
        .unwrap();

        match evaluate(&schema, &argv(&["--mode", "s", "-h"])).unwrap() {
            Evaluation::Help { text, options } => {
                assert!(text.starts_with("usage: render"));
                assert!(text.contains("Render a scene."));
                assert!(text.contains("--mode"));
                assert_eq!(options.len(), 1);
                assert_eq!(options[0].name, "mode");
            }
            Evaluation::Values(_) => panic!("expected help"),
        }
    }

    #[test]
    fn test_parse_errors_propagate() {
        let schema = Schema::from_json(r#"{"program": "p", "options": []}"#).unwrap();
        assert!(matches!(
            evaluate(&schema, &argv(&["--nope"])),
            Err(ParseError::UnknownOption { .. })
        ));
    }
}
