use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{AttackArgs, PositiveUsize, parse_header, parse_local_addr};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::ConfigFile;

/// Applies config values to `attack` arguments that were not given on the
/// command line. `matches` are the matches of the `attack` subcommand.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut AttackArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "targets")
        && let Some(targets) = config.targets.clone()
    {
        args.targets = targets;
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output.clone()
    {
        args.output = output;
    }

    if !is_cli(matches, "body")
        && let Some(body) = config.body.clone()
    {
        args.body = Some(body);
    }

    if !is_cli(matches, "ordering")
        && let Some(ordering) = config.ordering
    {
        args.ordering = ordering;
    }

    if !is_cli(matches, "duration")
        && let Some(duration) = config.duration.as_ref()
    {
        args.duration = duration
            .to_duration()
            .map_err(|err| field_error("duration", err))?;
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = timeout
            .to_duration()
            .map_err(|err| field_error("timeout", err))?;
    }

    if !is_cli(matches, "rate")
        && let Some(rate) = config.rate
    {
        args.rate = rate;
    }

    if !is_cli(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = concurrency;
    }

    if !is_cli(matches, "number")
        && let Some(number) = config.number
    {
        args.number = number;
    }

    if !is_cli(matches, "redirects")
        && let Some(redirects) = config.redirects
    {
        args.redirects = redirects;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        args.headers = parse_headers(headers)?;
    }

    if !is_cli(matches, "laddr")
        && let Some(laddr) = config.laddr.as_deref()
    {
        args.laddr = parse_local_addr(laddr).map_err(|err| field_error("laddr", err))?;
    }

    if !is_cli(matches, "max_in_flight")
        && let Some(limit) = config.max_in_flight
    {
        args.max_in_flight =
            Some(PositiveUsize::try_from(limit).map_err(|err| field_error("max_in_flight", err))?);
    }

    if !is_cli(matches, "no_summary")
        && let Some(no_summary) = config.no_summary
    {
        args.no_summary = no_summary;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn field_error(field: &'static str, source: ValidationError) -> AppError {
    AppError::config(ConfigError::InvalidField { field, source })
}

fn parse_headers(headers: &[String]) -> AppResult<Vec<(String, String)>> {
    let mut parsed = Vec::with_capacity(headers.len());
    for header in headers {
        parsed.push(
            parse_header(header)
                .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
        );
    }
    Ok(parsed)
}
