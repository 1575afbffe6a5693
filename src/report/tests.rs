use std::time::Duration;

use chrono::{TimeZone, Utc};

use super::*;
use crate::error::{AppError, ReportError};
use crate::results::{HitResult, INTEGRITY_FAILURE_CODE};

fn hit(offset_ms: i64, latency_ms: u64, code: u16, error: &str) -> Result<HitResult, String> {
    let timestamp = Utc
        .timestamp_opt(1_700_000_000, 0)
        .single()
        .ok_or("Invalid base timestamp")?
        .checked_add_signed(chrono::Duration::milliseconds(offset_ms))
        .ok_or("Timestamp overflow")?;
    Ok(HitResult {
        timestamp: Some(timestamp),
        latency: Duration::from_millis(latency_ms),
        bytes_out: 3,
        bytes_in: 10,
        code,
        error: error.to_owned(),
    })
}

fn sample() -> Result<Results, String> {
    Ok(Results::from(vec![
        hit(0, 10, 200, "")?,
        hit(500, 20, 200, "")?,
        hit(1000, 30, 404, "GET http://a/: 404 Not Found")?,
        hit(1500, 40, INTEGRITY_FAILURE_CODE, "GET http://a/: MD5 not matched")?,
        hit(2000, 50, 404, "GET http://a/: 404 Not Found")?,
    ]))
}

#[test]
fn reporter_names_resolve() -> Result<(), String> {
    let cases = [
        ("text", Some(ReporterKind::Text)),
        ("JSON", Some(ReporterKind::Json)),
        ("plot", Some(ReporterKind::Plot)),
        ("csv", None),
        ("", None),
    ];
    for (name, expected) in cases {
        if ReporterKind::from_name(name) != expected {
            return Err(format!("Unexpected reporter for `{}`", name));
        }
    }
    Ok(())
}

#[test]
fn metrics_summarize_results() -> Result<(), String> {
    let metrics = Metrics::compute(&sample()?).map_err(|err| err.to_string())?;

    if metrics.requests != 5 {
        return Err(format!("Expected 5 requests, got {}", metrics.requests));
    }
    if metrics.success_ratio_x100 != 4_000 {
        return Err(format!("Expected 40.00%, got {}", metrics.success_ratio_x100));
    }
    if metrics.duration != Duration::from_secs(2) {
        return Err(format!("Unexpected duration: {:?}", metrics.duration));
    }
    if metrics.wait != Duration::from_millis(50) {
        return Err(format!("Unexpected wait: {:?}", metrics.wait));
    }
    if metrics.latencies.mean != Duration::from_millis(30) {
        return Err(format!("Unexpected mean: {:?}", metrics.latencies.mean));
    }
    if metrics.latencies.max != Duration::from_millis(50) {
        return Err(format!("Unexpected max: {:?}", metrics.latencies.max));
    }
    let p50 = metrics.latencies.p50;
    if p50 < Duration::from_millis(29) || p50 > Duration::from_millis(31) {
        return Err(format!("Unexpected p50: {:?}", p50));
    }
    if metrics.bytes_in.total != 50 || metrics.bytes_in.mean_x100 != 1_000 {
        return Err(format!("Unexpected bytes in: {:?}", metrics.bytes_in));
    }
    if metrics.bytes_out.total != 15 || metrics.bytes_out.mean_x100 != 300 {
        return Err(format!("Unexpected bytes out: {:?}", metrics.bytes_out));
    }
    let codes: Vec<(u16, u64)> = metrics
        .status_codes
        .iter()
        .map(|(code, count)| (*code, *count))
        .collect();
    if codes != [(200, 2), (250, 1), (404, 2)] {
        return Err(format!("Unexpected status codes: {:?}", codes));
    }
    if metrics.errors
        != [
            "GET http://a/: 404 Not Found".to_owned(),
            "GET http://a/: MD5 not matched".to_owned(),
        ]
    {
        return Err(format!("Unexpected errors: {:?}", metrics.errors));
    }
    Ok(())
}

#[test]
fn metrics_of_empty_results_are_zero() -> Result<(), String> {
    let metrics = Metrics::compute(&Results::new()).map_err(|err| err.to_string())?;
    if metrics != Metrics::default() {
        return Err(format!("Expected default metrics, got {:?}", metrics));
    }
    Ok(())
}

#[test]
fn text_report_lists_summary_lines() -> Result<(), String> {
    let rendered = ReporterKind::Text
        .render(&sample()?)
        .map_err(|err| err.to_string())?;
    let text = String::from_utf8(rendered).map_err(|err| err.to_string())?;
    let expected = [
        "Requests      [total]                  5",
        "Success       [ratio]                  40.00%",
        "Status Codes  [code:count]             200:2  250:1  404:2",
        "Bytes In      [total, mean]            50, 10.00",
        "Error Set:",
        "GET http://a/: MD5 not matched",
    ];
    for line in expected {
        if !text.lines().any(|candidate| candidate == line) {
            return Err(format!("Missing line `{}` in:\n{}", line, text));
        }
    }
    Ok(())
}

#[test]
fn json_report_serializes_metrics() -> Result<(), String> {
    let rendered = ReporterKind::Json
        .render(&sample()?)
        .map_err(|err| err.to_string())?;
    let value: serde_json::Value =
        serde_json::from_slice(&rendered).map_err(|err| err.to_string())?;
    if value.get("requests").and_then(serde_json::Value::as_u64) != Some(5) {
        return Err(format!("Unexpected requests: {}", value));
    }
    let wait = value.get("wait").and_then(serde_json::Value::as_u64);
    if wait != Some(50_000_000) {
        return Err(format!("Wait should be in nanoseconds: {:?}", wait));
    }
    let ok_count = value
        .get("status_codes")
        .and_then(|codes| codes.get("200"))
        .and_then(serde_json::Value::as_u64);
    if ok_count != Some(2) {
        return Err(format!("Unexpected status codes: {}", value));
    }
    Ok(())
}

#[test]
fn plot_report_embeds_svg() -> Result<(), String> {
    let rendered = match ReporterKind::Plot.render(&sample()?) {
        Ok(rendered) => rendered,
        // Hosts without any system font cannot lay out chart labels.
        Err(AppError::Report(ReportError::Plot { message }))
            if message.to_ascii_lowercase().contains("font") =>
        {
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    let html = String::from_utf8(rendered).map_err(|err| err.to_string())?;
    if !html.starts_with("<!doctype html>") {
        return Err("Plot should be an HTML page".to_owned());
    }
    if !html.contains("<svg") || !html.contains("</svg>") {
        return Err("Plot should embed an SVG chart".to_owned());
    }
    if !html.contains("5 requests") {
        return Err("Plot should mention the request count".to_owned());
    }
    Ok(())
}
