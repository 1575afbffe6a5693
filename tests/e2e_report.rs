
use std::fs;

use tempfile::tempdir;

use support_single::{describe, run_stress};

const FIRST: &str = concat!(
    r#"{"timestamp":"2024-05-01T10:00:00Z","latency":10000000,"bytes_out":0,"bytes_in":2,"code":200,"error":""}"#,
    "\n",
    r#"{"timestamp":"2024-05-01T10:00:01Z","latency":30000000,"bytes_out":0,"bytes_in":0,"code":500,"error":"GET http://a/: 500 Internal Server Error"}"#,
    "\n",
);

const SECOND: &str = concat!(
    r#"{"timestamp":"2024-05-01T10:00:00.500Z","latency":20000000,"bytes_out":0,"bytes_in":2,"code":200,"error":""}"#,
    "\n",
);

#[test]
fn e2e_report_text_from_stdin() -> Result<(), String> {
    let output = run_stress(["report"], FIRST.as_bytes())?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    for expected in [
        "Requests      [total]                  2",
        "Success       [ratio]                  50.00%",
        "Status Codes  [code:count]             200:1  500:1",
        "GET http://a/: 500 Internal Server Error",
    ] {
        if !stdout.lines().any(|line| line == expected) {
            return Err(format!("Missing `{}` in:\n{}", expected, stdout));
        }
    }
    Ok(())
}

#[test]
fn e2e_report_json_merges_inputs() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let first = dir.path().join("first.ndjson");
    let second = dir.path().join("second.ndjson");
    let metrics = dir.path().join("metrics.json");
    fs::write(&first, FIRST).map_err(|err| format!("write failed: {}", err))?;
    fs::write(&second, SECOND).map_err(|err| format!("write failed: {}", err))?;

    let inputs = format!("{},{}", first.to_string_lossy(), second.to_string_lossy());
    let metrics_arg = metrics.to_string_lossy().into_owned();
    let output = run_stress(
        [
            "report",
            "--input",
            inputs.as_str(),
            "--reporter",
            "json",
            "--output",
            metrics_arg.as_str(),
        ],
        b"",
    )?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let data = fs::read(&metrics).map_err(|err| format!("read metrics failed: {}", err))?;
    let value: serde_json::Value =
        serde_json::from_slice(&data).map_err(|err| format!("invalid JSON: {}", err))?;
    if value.get("requests").and_then(serde_json::Value::as_u64) != Some(3) {
        return Err(format!("Expected 3 requests: {}", value));
    }
    // The 500 at 10:00:01 is the latest hit once both inputs are re-sorted.
    if value.get("wait").and_then(serde_json::Value::as_u64) != Some(30_000_000) {
        return Err(format!("Unexpected wait: {}", value));
    }
    Ok(())
}

#[test]
fn e2e_report_unknown_reporter_uses_text() -> Result<(), String> {
    let output = run_stress(["report", "--reporter", "csv"], SECOND.as_bytes())?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.starts_with("Requests") {
        return Err(format!("Expected the text report:\n{}", stdout));
    }
    Ok(())
}

#[test]
fn e2e_report_rejects_corrupt_input() -> Result<(), String> {
    let output = run_stress(["report"], b"{\"code\":200}\nnot json\n")?;
    if output.status.success() {
        return Err(format!("Expected failure\n{}", describe(&output)));
    }
    Ok(())
}
