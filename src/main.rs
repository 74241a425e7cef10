mod cli;
mod data;
mod pipeline;
mod render;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use cli::Args;
use data::error::{ErrorKind, QueryError};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let format = args.output.into();
    let plan = args.into_plan();
    debug!("plan: {plan:?}");

    let output = plan.execute()?;
    let text = render::format_output(&output, format)?;
    emit(&mut io::stdout().lock(), &text)
}

/// Write rendered output with exactly one trailing newline.
fn emit(out: &mut impl Write, text: &str) -> Result<()> {
    writeln!(out, "{}", text.trim_end_matches('\n')).context("writing output")?;
    out.flush().context("writing output")
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

/// One line per failure, keyed by what went wrong.
fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<QueryError>() {
        Some(e) if e.kind() == ErrorKind::NotFound => format!("Error: File not found: {e}"),
        Some(e) => format!("Error: {e}"),
        None => format!("Error: {err:#}"),
    }
}
