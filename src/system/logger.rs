use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Tool-specific log filter; wins over `RUST_LOG`.
pub const LOG_ENV: &str = "STRESS_LOG";

/// Installs the global subscriber.
///
/// Logs go to stderr so results can be piped through stdout.
pub fn init_logging(verbose: bool, no_color: bool) {
    let stress_log = std::env::var(LOG_ENV).ok();
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(stress_log.as_deref(), rust_log.as_deref(), verbose);

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

/// Picks the filter directive: the first non-blank of `STRESS_LOG` and
/// `RUST_LOG`, else `debug`/`info` from `verbose`. An unparsable directive
/// falls back to the `verbose` level.
fn filter_directive<'a>(stress_log: Option<&'a str>, rust_log: Option<&'a str>, verbose: bool) -> &'a str {
    let level = if verbose { "debug" } else { "info" };
    let non_blank = |value: &'a str| Some(value.trim()).filter(|value| !value.is_empty());
    match stress_log.and_then(non_blank).or_else(|| rust_log.and_then(non_blank)) {
        Some(directive) if EnvFilter::try_new(directive).is_ok() => directive,
        _ => level,
    }
}
