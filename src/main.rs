#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! optbind — parse command lines against a JSON option schema.

mod cli;
mod commands;
mod types;

use std::env;

use anyhow::bail;
use clap::Parser;
use log::LevelFilter;

use cli::{Cli, OutputCtx, write_error};
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logger(cli.debug) {
        eprintln!("Error: {err}");
        std::process::exit(2);
    }

    let ctx = OutputCtx::new(cli.output, cli.json, cli.no_header, cli.debug);

    match commands::dispatch(&cli.command, &ctx) {
        Ok(()) => {}
        Err(err) => {
            let error_output = ErrorOutput::from_cli_error(&err);
            write_error(&error_output, cli.output, cli.json);
            std::process::exit(err.exit_code());
        }
    }
}

/// Configure `env_logger` from `OPTBIND_LOG`.
///
/// `--debug` logs at debug level when `OPTBIND_LOG` is unset; an explicit
/// filter always wins. `OPTBIND_LOG_WITH_TIME` selects a timestamp precision
/// (`s`, `ms`, `us`, `ns`).
fn init_logger(debug: bool) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.format_indent(Some(2));
    let filter = env::var("OPTBIND_LOG").ok();
    if let Some(level) = debug_level(debug, filter.as_deref()) {
        builder.filter_level(level);
    }
    if let Some(filter) = filter.as_deref() {
        builder.parse_filters(filter);
    }
    if let Ok(precision) = env::var("OPTBIND_LOG_WITH_TIME") {
        match precision.as_str() {
            "s" => builder.format_timestamp_secs(),
            "ms" => builder.format_timestamp_millis(),
            "us" => builder.format_timestamp_micros(),
            "ns" => builder.format_timestamp_nanos(),
            other => bail!(
                "invalid OPTBIND_LOG_WITH_TIME precision, expected one of [s, ms, us, ns], got '{other}'"
            ),
        };
    } else {
        builder.format_timestamp(None);
    }
    builder.try_init()?;
    Ok(())
}

/// Level `--debug` implies, unless a non-empty `OPTBIND_LOG` filter is set.
fn debug_level(debug: bool, filter: Option<&str>) -> Option<LevelFilter> {
    (debug && filter.is_none_or(|f| f.trim().is_empty())).then_some(LevelFilter::Debug)
}
