/// Output formatting: JSON, table, shell modes. TTY detection.
use std::io::{IsTerminal, Write};
use std::time::Instant;

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use log::debug;
use optbind::OptionInfo;
use serde::Serialize;

use super::args::OutputFormat;
use crate::types::{ErrorOutput, ParseOutput, ResolveOutput};

/// Resolve the effective output format, handling `--json` flag and TTY auto-detection.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        return OutputFormat::Json;
    }
    if fmt == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        fmt
    }
}

/// Output context passed to all formatters.
pub struct OutputCtx {
    pub format: OutputFormat,
    pub no_header: bool,
    /// When true, log timing spans.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool, no_header: bool, debug: bool) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
            no_header,
            debug,
        }
    }

    /// Start a named debug timer. Logs elapsed on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }
}

// --- Parse results ---

/// Write the values and positionals produced by `parse`.
pub fn write_parse_output(output: &ParseOutput, ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Compact => print_compact_json(output),
        OutputFormat::Ndjson => {
            print_ndjson(&output.options);
            print_compact_json(&serde_json::json!({ "positional": output.positional }));
        }
        OutputFormat::Shell => {
            for option in &output.options {
                println!("{}={}", shell_name(&option.name), shell_quote(&option.current));
            }
            let quoted: Vec<String> = output.positional.iter().map(|p| shell_quote(p)).collect();
            println!("set -- {}", quoted.join(" "));
        }
        OutputFormat::Table | OutputFormat::Auto => write_parse_table(output, ctx),
    }
}

fn write_parse_table(output: &ParseOutput, ctx: &OutputCtx) {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !ctx.no_header {
        table.set_header(["NAME", "VALUE", "DEFAULT", "SET"]);
    }
    for option in &output.options {
        table.add_row([
            option.name.as_str(),
            option.current.as_str(),
            option.default.as_str(),
            if option.set { "yes" } else { "" },
        ]);
    }
    println!("{table}");

    if !output.positional.is_empty() {
        println!("positional: {}", output.positional.join(" "));
    }
}

// --- Help ---

/// Write help for a schema: rendered text, or option metadata as JSON.
pub fn write_help(text: &str, options: &[&OptionInfo], ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_json(options),
        OutputFormat::Compact => print_compact_json(options),
        OutputFormat::Ndjson => print_ndjson(options),
        OutputFormat::Shell | OutputFormat::Table | OutputFormat::Auto => print!("{text}"),
    }
}

// --- Resolve ---

/// Write the label a token resolved to.
pub fn write_resolve(result: &ResolveOutput, ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_json(result),
        OutputFormat::Compact => print_compact_json(result),
        OutputFormat::Ndjson => print_ndjson(&[result]),
        OutputFormat::Shell => println!("{}", shell_quote(&result.value)),
        OutputFormat::Table | OutputFormat::Auto => println!("{}", result.value),
    }
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, format: OutputFormat, json_flag: bool) {
    let fmt = resolve_format(format, json_flag);
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match fmt {
        OutputFormat::Json | OutputFormat::Compact | OutputFormat::Ndjson => {
            let s = serde_json::to_string_pretty(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        _ => {
            let _ = writeln!(out, "Error: {}", err.error.message);
        }
    }
}

// --- Shell helpers ---

/// Environment-style variable name: `log-level` → `LOG_LEVEL`.
fn shell_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect()
}

/// Single-quote for POSIX shells.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            debug!("{}: {ms:.2}ms", self.label);
        }
    }
}

// --- Generic JSON helpers ---

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

fn print_compact_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

fn print_ndjson<T: Serialize>(values: &[T]) {
    for v in values {
        match serde_json::to_string(v) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("JSON serialization error: {e}"),
        }
    }
}
