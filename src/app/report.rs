use std::io::Write;

use tracing::warn;

use crate::args::ReportArgs;
use crate::error::{AppError, AppResult};
use crate::report::ReporterKind;
use crate::results::Results;

use super::files::{open_input, open_output};

/// Runs the `report` command.
///
/// Every input is decoded and merged into one collection, re-sorted by
/// timestamp before rendering.
///
/// # Errors
///
/// Returns an error when an input cannot be opened or decoded, rendering
/// fails, or the output cannot be written.
pub fn run_report(args: &ReportArgs) -> AppResult<()> {
    let reporter = ReporterKind::from_name(&args.reporter).unwrap_or_else(|| {
        warn!(
            "Reporter '{}' is not supported. Using {}",
            args.reporter,
            ReporterKind::Text
        );
        ReporterKind::Text
    });

    let mut all = Results::new();
    for input in args.inputs() {
        let reader = open_input(input).map_err(|err| AppError::file("Input file", input, err))?;
        all.extend(Results::decode(reader)?);
    }
    all.sort();

    let rendered = reporter.render(&all)?;
    let mut output = open_output(&args.output)
        .map_err(|err| AppError::file("Output file", &args.output, err))?;
    output.write_all(&rendered)?;
    output.flush()?;
    Ok(())
}
