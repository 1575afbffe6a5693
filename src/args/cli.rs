use std::net::IpAddr;
use std::num::NonZeroU64;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use super::defaults::{
    DEFAULT_DURATION, DEFAULT_LADDR, DEFAULT_NUMBER, DEFAULT_ORDERING, DEFAULT_REPORTER,
    DEFAULT_TIMEOUT, STDIN, STDOUT,
};
use super::parsers::{
    parse_duration_arg, parse_header, parse_local_addr, parse_ordering, parse_positive_usize,
};
use super::types::{AttackMode, Ordering, PositiveUsize};
use crate::error::ValidationError;
use crate::http::DEFAULT_REDIRECTS;

const EXAMPLES: &str = "Examples:
  echo 'GET http://127.0.0.1:8088/' | stress attack --duration 5s --rate 100 | tee results.ndjson | stress report
  echo 'POST http://127.0.0.1:12345/ form:avatar:photo.jpg' | stress attack -c 10 -n 500 > results.ndjson
  stress attack --targets targets.txt --rate 50 --output results.ndjson
  stress report --input results.ndjson --reporter json > metrics.json
  cat results.ndjson | stress report --reporter plot > plot.html";

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "stress",
    version,
    about = "HTTP load generator: fire target requests at a fixed rate or concurrency level and report on the results.",
    after_help = EXAMPLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Number of worker threads (defaults to the available parallelism)
    #[arg(long = "cpus", global = true, value_parser = parse_positive_usize)]
    pub cpus: Option<PositiveUsize>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to a TOML or JSON config file (defaults to ./stress.toml or ./stress.json)
    #[arg(long = "config", global = true)]
    pub config: Option<String>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Fire targets and write the results
    Attack(AttackArgs),
    /// Render a report from attack results
    Report(ReportArgs),
}

#[derive(Debug, Args, Clone)]
pub struct AttackArgs {
    /// Targets file, or `stdin`
    #[arg(long = "targets", default_value = STDIN)]
    pub targets: String,

    /// Results file, or `stdout`
    #[arg(long = "output", default_value = STDOUT)]
    pub output: String,

    /// File whose content is sent as the body of every target
    #[arg(long = "body")]
    pub body: Option<String>,

    /// Target ordering [sequential, random]
    #[arg(long = "ordering", default_value = DEFAULT_ORDERING, value_parser = parse_ordering)]
    pub ordering: Ordering,

    /// How long a rate attack runs (ms/s/m/h)
    #[arg(long = "duration", default_value = DEFAULT_DURATION, value_parser = parse_duration_arg)]
    pub duration: Duration,

    /// Per-request timeout, `0` disables it (ms/s/m/h)
    #[arg(long = "timeout", default_value = DEFAULT_TIMEOUT, value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Requests per second
    #[arg(long = "rate", default_value_t = 0)]
    pub rate: u64,

    /// Number of concurrent workers
    #[arg(long = "concurrency", short = 'c', default_value_t = 0)]
    pub concurrency: u64,

    /// Total requests of a concurrency attack
    #[arg(long = "number", short = 'n', default_value_t = DEFAULT_NUMBER)]
    pub number: u64,

    /// Maximum redirects followed per request
    #[arg(long = "redirects", default_value_t = DEFAULT_REDIRECTS)]
    pub redirects: usize,

    /// Request header 'Key: Value' (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Local IP address requests are sent from
    #[arg(long = "laddr", default_value = DEFAULT_LADDR, value_parser = parse_local_addr)]
    pub laddr: IpAddr,

    /// Cap on in-flight requests during a rate attack
    #[arg(long = "max-in-flight", value_parser = parse_positive_usize)]
    pub max_in_flight: Option<PositiveUsize>,

    /// Do not print the text report after the attack
    #[arg(long = "no-summary")]
    pub no_summary: bool,
}

impl AttackArgs {
    /// Checks the rate and concurrency flags and picks the scheduler.
    ///
    /// # Errors
    ///
    /// Returns an error when neither or both of rate and concurrency are set,
    /// or when the chosen mode lacks its duration or request count.
    pub fn mode(&self) -> Result<AttackMode, ValidationError> {
        let rate = NonZeroU64::new(self.rate);
        let concurrency = NonZeroU64::new(self.concurrency);
        match (rate, concurrency) {
            (None, None) => Err(ValidationError::RateAndConcurrencyZero),
            (Some(_), Some(_)) => Err(ValidationError::RateConcurrencyConflict),
            (Some(rate), None) => {
                if self.duration.is_zero() {
                    return Err(ValidationError::RateRequiresDuration);
                }
                Ok(AttackMode::Rate {
                    rate,
                    duration: self.duration,
                })
            }
            (None, Some(concurrency)) => {
                if self.number == 0 {
                    return Err(ValidationError::ConcurrencyRequiresNumber);
                }
                Ok(AttackMode::Concurrency {
                    concurrency,
                    total: self.number,
                })
            }
        }
    }

    /// Timeout handed to the client, `None` when disabled.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        (!self.timeout.is_zero()).then_some(self.timeout)
    }
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    /// Comma separated results files, or `stdin`
    #[arg(long = "input", default_value = STDIN)]
    pub input: String,

    /// Report file, or `stdout`
    #[arg(long = "output", default_value = STDOUT)]
    pub output: String,

    /// Reporter [text, json, plot]
    #[arg(long = "reporter", default_value = DEFAULT_REPORTER)]
    pub reporter: String,
}

impl ReportArgs {
    /// Input sources listed in `--input`, blanks dropped.
    pub fn inputs(&self) -> impl Iterator<Item = &str> {
        self.input
            .split(',')
            .map(str::trim)
            .filter(|input| !input.is_empty())
    }
}
