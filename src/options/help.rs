/// Usage line and option table rendered from registry metadata.
use comfy_table::{Cell, Table, presets::UTF8_BORDERS_ONLY};

use super::registry::{OptionInfo, OptionRegistry};

/// `usage: PROG [OPTIONS] [ARGS]...`
#[must_use]
pub fn render_usage(program: &str, registry: &OptionRegistry<'_>) -> String {
    if registry.is_empty() {
        format!("usage: {program} [ARGS]...")
    } else {
        format!("usage: {program} [OPTIONS] [ARGS]...")
    }
}

/// Flags as written on the command line, e.g. `-j, --threads`.
#[must_use]
pub fn flag_spelling(info: &OptionInfo) -> String {
    match &info.short_name {
        Some(short) => format!("-{short}, --{}", info.name),
        None => format!("    --{}", info.name),
    }
}

/// Full help text: usage, optional about line, and the option table.
///
/// `show_current` adds a column with each option's current value, useful
/// after a parse.
#[must_use]
pub fn render_help(
    program: &str,
    about: Option<&str>,
    registry: &OptionRegistry<'_>,
    show_current: bool,
) -> String {
    let mut out = render_usage(program, registry);
    out.push('\n');
    if let Some(about) = about {
        out.push('\n');
        out.push_str(about);
        out.push('\n');
    }
    if registry.is_empty() {
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);

    let mut headers = vec!["FLAGS", "DESCRIPTION", "DEFAULT"];
    if show_current {
        headers.push("CURRENT");
    }
    headers.push("VALUES");
    table.set_header(headers);

    for info in registry.options() {
        let mut row = vec![
            Cell::new(flag_spelling(info)),
            Cell::new(&info.description),
            Cell::new(&info.default_value),
        ];
        if show_current {
            row.push(Cell::new(&info.current_value));
        }
        row.push(Cell::new(info.enum_values.join("|")));
        table.add_row(row);
    }

    out.push('\n');
    out.push_str(&table.to_string());
    out.push('\n');
    out
}
