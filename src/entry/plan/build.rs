use clap::ArgMatches;
use tracing::debug;

use crate::args::{Cli, Command};
use crate::config::{apply_config, load_config};
use crate::error::AppResult;

use super::types::RunPlan;

/// Resolves the command to run, layering the config file under attack flags.
pub(crate) fn build_plan(cli: Cli, matches: &ArgMatches) -> AppResult<RunPlan> {
    match cli.command {
        Command::Attack(mut args) => {
            if let Some(config) = load_config(cli.config.as_deref())?
                && let Some(attack_matches) = matches.subcommand_matches("attack")
            {
                apply_config(&mut args, attack_matches, &config)?;
                debug!("Config applied to attack arguments");
            }
            Ok(RunPlan::Attack(args))
        }
        Command::Report(args) => Ok(RunPlan::Report(args)),
    }
}
