use std::time::Duration;

use serde::Deserialize;

use crate::args::{Ordering, parse_duration_arg};
use crate::error::ValidationError;

/// Attack defaults read from `stress.toml` / `stress.json`.
///
/// Every field is optional; flags given on the command line win.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub targets: Option<String>,
    pub output: Option<String>,
    pub body: Option<String>,
    pub ordering: Option<Ordering>,
    pub duration: Option<DurationValue>,
    pub timeout: Option<DurationValue>,
    pub rate: Option<u64>,
    pub concurrency: Option<u64>,
    pub number: Option<u64>,
    pub redirects: Option<usize>,
    pub headers: Option<Vec<String>>,
    pub laddr: Option<String>,
    pub max_in_flight: Option<usize>,
    pub no_summary: Option<bool>,
}

/// A duration written either as whole seconds or as `<n>[ms|s|m|h]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
