
use std::fs;

use tempfile::tempdir;

use support_single::{describe, run_stress, spawn_http_server};

fn result_lines(data: &[u8]) -> Result<Vec<serde_json::Value>, String> {
    String::from_utf8_lossy(data)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(|err| format!("{}: {}", line, err)))
        .collect()
}

#[test]
fn e2e_attack_concurrency_writes_results_and_summary() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let targets = dir.path().join("targets.txt");
    let results = dir.path().join("results.ndjson");
    fs::write(
        &targets,
        format!("// api\nGET {url}/health\nPOST x-trace:e2e {url}/submit\n"),
    )
    .map_err(|err| format!("write targets failed: {}", err))?;

    let targets_arg = targets.to_string_lossy().into_owned();
    let results_arg = results.to_string_lossy().into_owned();
    let output = run_stress(
        [
            "attack",
            "--targets",
            targets_arg.as_str(),
            "--output",
            results_arg.as_str(),
            "-c",
            "4",
            "-n",
            "20",
            "--header",
            "Accept: text/plain",
        ],
        b"",
    )?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let data = fs::read(&results).map_err(|err| format!("read results failed: {}", err))?;
    let lines = result_lines(&data)?;
    if lines.len() != 20 {
        return Err(format!("Expected 20 results, got {}", lines.len()));
    }
    if let Some(bad) = lines
        .iter()
        .find(|line| line.get("code").and_then(serde_json::Value::as_u64) != Some(200))
    {
        return Err(format!("Unexpected result: {}", bad));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Requests      [total]                  20") {
        return Err(format!("Missing text summary:\n{}", stdout));
    }
    Ok(())
}

#[test]
fn e2e_attack_rate_streams_targets_from_stdin() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let targets = format!("GET {url}/a\nGET {url}/b\n");

    let output = run_stress(
        [
            "attack",
            "--rate",
            "20",
            "--duration",
            "500ms",
            "--ordering",
            "sequential",
        ],
        targets.as_bytes(),
    )?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let lines = result_lines(&output.stdout)?;
    if lines.len() != 10 {
        return Err(format!(
            "Expected 10 results on stdout, got {}\n{}",
            lines.len(),
            describe(&output)
        ));
    }
    Ok(())
}

#[test]
fn e2e_attack_rejects_invalid_flags() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let results = dir.path().join("results.ndjson");
    let results_arg = results.to_string_lossy().into_owned();
    let output = run_stress(
        [
            "attack",
            "--rate",
            "5",
            "-c",
            "5",
            "--output",
            results_arg.as_str(),
        ],
        b"GET http://127.0.0.1:1/\n",
    )?;
    if output.status.success() {
        return Err(format!("Expected failure\n{}", describe(&output)));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("Rate: is conflict with Concurrency Level:") {
        return Err(format!("Unexpected error output:\n{}", stderr));
    }
    if results.exists() {
        return Err("Output file must not be created".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_attack_rejects_malformed_targets() -> Result<(), String> {
    let output = run_stress(["attack", "-c", "1", "-n", "1"], b"GET\n")?;
    if output.status.success() {
        return Err(format!("Expected failure\n{}", describe(&output)));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("Invalid request format: `GET`") {
        return Err(format!("Unexpected error output:\n{}", stderr));
    }
    Ok(())
}
