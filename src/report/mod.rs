//! Reporters turning a result collection into text, JSON or an HTML plot.
mod histogram;
mod json;
mod metrics;
mod plot;
mod text;

#[cfg(test)]
mod tests;

use std::fmt;

use crate::error::AppResult;
use crate::results::Results;

pub use metrics::{ByteMetrics, LatencyMetrics, Metrics, RATIO_SCALE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReporterKind {
    #[default]
    Text,
    Json,
    Plot,
}

impl ReporterKind {
    /// Looks a reporter up by its CLI name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            "plot" => Some(Self::Plot),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Plot => "plot",
        }
    }

    /// Renders `results` in this format.
    ///
    /// # Errors
    ///
    /// Returns an error when the metrics or the output cannot be produced.
    pub fn render(self, results: &Results) -> AppResult<Vec<u8>> {
        match self {
            Self::Text => text::render(&Metrics::compute(results)?),
            Self::Json => json::render(&Metrics::compute(results)?),
            Self::Plot => plot::render(results),
        }
    }
}

impl fmt::Display for ReporterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
