use std::io::Write;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::info;

use crate::args::defaults::STDOUT;
use crate::args::{AttackArgs, AttackMode, Ordering, PositiveUsize};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{Attacker, AttackerConfig};
use crate::report::ReporterKind;
use crate::results::Results;
use crate::targets::{Headers, Targets};

use super::files::{open_input, open_output};

/// Runs the `attack` command end to end.
///
/// Flags are validated before any file is touched. The results are encoded to
/// the output sink, then summarized on stdout unless that is the sink.
///
/// # Errors
///
/// Returns an error for invalid flags, unreadable inputs, an unparsable
/// targets file, a client that cannot be built, or a failed write.
pub async fn run_attack(args: &AttackArgs) -> AppResult<()> {
    let mode = args.mode().map_err(AppError::validation)?;

    let body = read_body(args.body.as_deref())?;
    let headers = Headers::from_pairs(
        args.headers
            .iter()
            .map(|(name, value)| (name, value.as_str())),
    );
    let mut targets = read_targets(&args.targets, &body, &headers)?;

    if args.ordering == Ordering::Random {
        targets.shuffle(time_seed());
    }

    let mut output = open_output(&args.output)
        .map_err(|err| AppError::file("Output file", &args.output, err))?;

    let attacker = Attacker::new(&AttackerConfig {
        redirects: args.redirects,
        timeout: args.request_timeout(),
        local_addr: args.laddr,
        max_in_flight: args.max_in_flight.map(PositiveUsize::non_zero),
    })?;

    let targets = Arc::new(targets);
    let results = match mode {
        AttackMode::Rate { rate, duration } => {
            info!(
                "Stress is attacking {} targets in {} order and {} rate for {:?}...",
                targets.len(),
                args.ordering,
                rate,
                duration
            );
            attacker.attack_rate(targets, rate, duration).await?
        }
        AttackMode::Concurrency { concurrency, total } => {
            info!(
                "Stress is attacking {} targets in {} order and {} concurrency level for {} times...",
                targets.len(),
                args.ordering,
                concurrency,
                total
            );
            attacker
                .attack_concurrency(targets, concurrency, total)
                .await?
        }
    };

    info!("Done! Writing results to '{}'...", args.output);
    results.encode(&mut output)?;

    if !args.no_summary && args.output != STDOUT {
        print_summary(&results)?;
    }
    Ok(())
}

fn read_body(path: Option<&str>) -> AppResult<Bytes> {
    let Some(path) = path else {
        return Ok(Bytes::new());
    };
    std::fs::read(path)
        .map(Bytes::from)
        .map_err(|err| AppError::file("Body file", path, err))
}

fn read_targets(path: &str, body: &Bytes, headers: &Headers) -> AppResult<Targets> {
    let reader = open_input(path).map_err(|err| AppError::file("Targets file", path, err))?;
    let targets = Targets::from_reader(reader, body, headers)?;
    if targets.is_empty() {
        return Err(AppError::validation(ValidationError::TargetsEmpty));
    }
    Ok(targets)
}

fn print_summary(results: &Results) -> AppResult<()> {
    let report = ReporterKind::Text.render(results)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&report)?;
    stdout.flush()?;
    Ok(())
}

fn time_seed() -> u64 {
    Utc::now()
        .timestamp_nanos_opt()
        .map_or(0, i64::unsigned_abs)
}
