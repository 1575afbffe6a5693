use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use clap::{CommandFactory, FromArgMatches};
use tempfile::tempdir;

use super::types::DurationValue;
use super::{apply_config, find_default_config, load_config_file};
use crate::args::{AttackArgs, Cli, Command, Ordering, PositiveUsize};
use crate::error::{AppError, ConfigError};

fn attack_with(cli_args: &[&str], config_name: &str, content: &str) -> Result<AttackArgs, String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join(config_name);
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;
    let config = load_config_file(&path).map_err(|err| err.to_string())?;

    let matches = Cli::command()
        .try_get_matches_from(cli_args)
        .map_err(|err| err.to_string())?;
    let cli = Cli::from_arg_matches(&matches).map_err(|err| err.to_string())?;
    let Command::Attack(mut attack) = cli.command else {
        return Err("Expected attack command".to_owned());
    };
    let sub_matches = matches
        .subcommand_matches("attack")
        .ok_or("Missing attack matches")?;
    apply_config(&mut attack, sub_matches, &config).map_err(|err| err.to_string())?;
    Ok(attack)
}

#[test]
fn toml_config_fills_unset_flags() -> Result<(), String> {
    let content = r#"
targets = "targets.txt"
rate = 20
duration = "2m"
timeout = 5
ordering = "sequential"
headers = ["X-Api-Key: secret", "Accept: */*"]
laddr = "127.0.0.1"
max_in_flight = 64
no_summary = true
"#;
    let attack = attack_with(&["stress", "attack"], "stress.toml", content)?;

    if attack.targets != "targets.txt" || attack.rate != 20 {
        return Err(format!("Config not applied: {:?}", attack));
    }
    if attack.duration != Duration::from_secs(120) || attack.timeout != Duration::from_secs(5) {
        return Err(format!("Unexpected durations: {:?}", attack));
    }
    if attack.ordering != Ordering::Sequential {
        return Err("Expected sequential ordering".to_owned());
    }
    if attack.headers.len() != 2 {
        return Err(format!("Unexpected headers: {:?}", attack.headers));
    }
    if attack.laddr != IpAddr::V4(Ipv4Addr::LOCALHOST) {
        return Err(format!("Unexpected laddr: {}", attack.laddr));
    }
    if attack.max_in_flight.map(PositiveUsize::get) != Some(64) || !attack.no_summary {
        return Err(format!("Unexpected flags: {:?}", attack));
    }
    Ok(())
}

#[test]
fn command_line_flags_win_over_config() -> Result<(), String> {
    let content = r#"{"rate": 20, "duration": "5s", "output": "from-config.json"}"#;
    let attack = attack_with(
        &["stress", "attack", "--rate", "7", "--output", "cli.json"],
        "stress.json",
        content,
    )?;
    if attack.rate != 7 || attack.output != "cli.json" {
        return Err(format!("CLI values were overridden: {:?}", attack));
    }
    if attack.duration != Duration::from_secs(5) {
        return Err(format!("Config duration not applied: {:?}", attack.duration));
    }
    Ok(())
}

#[test]
fn invalid_config_values_are_rejected() -> Result<(), String> {
    let cases = [
        "laddr = \"not-an-ip\"",
        "headers = [\"NoColon\"]",
        "max_in_flight = 0",
        "duration = \"5 days\"",
    ];
    for content in cases {
        if attack_with(&["stress", "attack"], "stress.toml", content).is_ok() {
            return Err(format!("Expected `{}` to be rejected", content));
        }
    }
    Ok(())
}

#[test]
fn duration_values_accept_numbers_and_text() -> Result<(), String> {
    let seconds = DurationValue::Seconds(3)
        .to_duration()
        .map_err(|err| err.to_string())?;
    let text = DurationValue::Text("250ms".to_owned())
        .to_duration()
        .map_err(|err| err.to_string())?;
    if seconds != Duration::from_secs(3) || text != Duration::from_millis(250) {
        return Err(format!("Unexpected durations: {:?} {:?}", seconds, text));
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("stress.yaml");
    std::fs::write(&path, "rate: 1").map_err(|err| format!("write failed: {}", err))?;
    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected unsupported extension".to_owned()),
    }
}

#[test]
fn extension_match_ignores_case() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("LOAD.TOML");
    std::fs::write(&path, "rate = 7\nordering = \"random\"\n")
        .map_err(|err| format!("write failed: {}", err))?;
    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.rate != Some(7) || config.ordering != Some(Ordering::Random) {
        return Err(format!("Unexpected config: {:?}", config));
    }
    Ok(())
}

#[test]
fn default_lookup_prefers_toml_over_json() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    if let Some(found) = find_default_config(dir.path()) {
        return Err(format!("Empty directory should have no config: {}", found.display()));
    }

    std::fs::create_dir(dir.path().join("stress.toml")).map_err(|err| err.to_string())?;
    let json = dir.path().join("stress.json");
    std::fs::write(&json, r#"{"concurrency": 4, "number": 40}"#).map_err(|err| err.to_string())?;
    if find_default_config(dir.path()).as_deref() != Some(json.as_path()) {
        return Err("A directory named stress.toml must be skipped".to_owned());
    }
    let config = load_config_file(&json).map_err(|err| err.to_string())?;
    if config.concurrency != Some(4) || config.number != Some(40) {
        return Err(format!("Unexpected config: {:?}", config));
    }

    std::fs::remove_dir(dir.path().join("stress.toml")).map_err(|err| err.to_string())?;
    let toml = dir.path().join("stress.toml");
    std::fs::write(&toml, "rate = 3\n").map_err(|err| err.to_string())?;
    if find_default_config(dir.path()).as_deref() != Some(toml.as_path()) {
        return Err("stress.toml should win over stress.json".to_owned());
    }
    Ok(())
}
