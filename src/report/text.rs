use std::fmt::Write as _;

use crate::error::{AppError, AppResult, ReportError};

use super::metrics::{ByteMetrics, Metrics, RATIO_SCALE};

const PERCENT_DIVISOR: u64 = 100;

/// Renders an aligned plain text summary.
pub(super) fn render(metrics: &Metrics) -> AppResult<Vec<u8>> {
    write_summary(metrics)
        .map(String::into_bytes)
        .map_err(|err| AppError::report(ReportError::WriteLine { source: err }))
}

fn write_summary(metrics: &Metrics) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Requests      [total]                  {}", metrics.requests)?;
    writeln!(
        out,
        "Duration      [total, wait]            {:?}, {:?}",
        metrics.duration, metrics.wait
    )?;
    let latencies = &metrics.latencies;
    writeln!(
        out,
        "Latencies     [mean, 50, 95, 99, max]  {:?}, {:?}, {:?}, {:?}, {:?}",
        latencies.mean, latencies.p50, latencies.p95, latencies.p99, latencies.max
    )?;
    writeln!(
        out,
        "Bytes In      [total, mean]            {}",
        format_bytes(&metrics.bytes_in)
    )?;
    writeln!(
        out,
        "Bytes Out     [total, mean]            {}",
        format_bytes(&metrics.bytes_out)
    )?;
    let ratio_whole = RATIO_SCALE.checked_div(PERCENT_DIVISOR).unwrap_or(1);
    writeln!(
        out,
        "Success       [ratio]                  {}.{:02}%",
        metrics.success_ratio_x100.checked_div(ratio_whole).unwrap_or(0),
        metrics.success_ratio_x100.checked_rem(ratio_whole).unwrap_or(0)
    )?;
    let codes: Vec<String> = metrics
        .status_codes
        .iter()
        .map(|(code, count)| format!("{}:{}", code, count))
        .collect();
    writeln!(out, "Status Codes  [code:count]             {}", codes.join("  "))?;
    writeln!(out, "Error Set:")?;
    for error in &metrics.errors {
        writeln!(out, "{}", error)?;
    }
    Ok(out)
}

fn format_bytes(bytes: &ByteMetrics) -> String {
    format!(
        "{}, {}.{:02}",
        bytes.total,
        bytes.mean_x100.checked_div(PERCENT_DIVISOR).unwrap_or(0),
        bytes.mean_x100.checked_rem(PERCENT_DIVISOR).unwrap_or(0)
    )
}
