//! Process entry: argument parsing, logging, runtime and dispatch.
mod plan;

use std::ffi::OsString;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::Cli;
use crate::error::AppResult;
use plan::{build_plan, execute_plan};

/// Parses the process arguments and runs the selected command.
///
/// # Errors
///
/// Returns the first fatal error of the run.
pub fn run() -> AppResult<()> {
    let Some((cli, matches)) = parse_args()? else {
        return Ok(());
    };

    crate::system::logger::init_logging(cli.verbose, cli.no_color);

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(cpus) = cli.cpus {
        builder.worker_threads(cpus.get());
    }
    let runtime = builder.build()?;

    runtime.block_on(run_async(cli, &matches))
}

fn parse_args() -> AppResult<Option<(Cli, ArgMatches)>> {
    let mut cmd = Cli::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let cli = Cli::from_arg_matches(&matches)?;

    Ok(Some((cli, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--")
}

async fn run_async(cli: Cli, matches: &ArgMatches) -> AppResult<()> {
    let plan = build_plan(cli, matches)?;
    execute_plan(plan).await
}
