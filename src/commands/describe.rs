/// `describe` command: render the help a schema declares.
use optbind::OptionRegistry;
use optbind::options::render_help;
use optbind::schema::Schema;

use super::CliError;
use crate::cli::OutputCtx;
use crate::cli::args::DescribeArgs;
use crate::cli::output::write_help;

/// Run `optbind describe`.
///
/// # Errors
///
/// Returns `CliError::Schema` if the schema cannot be loaded.
pub fn run(args: &DescribeArgs, ctx: &OutputCtx) -> Result<(), CliError> {
    let _t_load = ctx.timer("load_schema");
    let schema = Schema::load(&args.schema)?;
    drop(_t_load);

    let mut slots = schema.slots();
    let registry = schema.bind(&mut slots);
    write_schema_help(&schema, &registry, false, ctx);
    Ok(())
}

/// Write help for `schema` using the metadata in `registry`.
pub fn write_schema_help(
    schema: &Schema,
    registry: &OptionRegistry<'_>,
    show_current: bool,
    ctx: &OutputCtx,
) {
    let text = render_help(
        &schema.program,
        schema.about.as_deref(),
        registry,
        show_current,
    );
    let options: Vec<_> = registry.options().collect();
    write_help(&text, &options, ctx);
}
