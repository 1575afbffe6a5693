use crate::error::{AppError, AppResult, ReportError};

use super::metrics::Metrics;

pub(super) fn render(metrics: &Metrics) -> AppResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(metrics)
        .map_err(|err| AppError::report(ReportError::SerializeJson { source: err }))?;
    bytes.push(b'\n');
    Ok(bytes)
}
