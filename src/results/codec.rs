use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{AppError, AppResult, ResultsError};

use super::{HitResult, Results};

impl Results {
    /// Writes one JSON object per line and flushes `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error when a result cannot be serialized or written.
    pub fn encode<W: Write>(&self, mut writer: W) -> AppResult<()> {
        for result in &self.0 {
            serde_json::to_writer(&mut writer, result)
                .map_err(|err| AppError::results(ResultsError::Encode { source: err }))?;
            writer
                .write_all(b"\n")
                .map_err(|err| AppError::results(ResultsError::Write { source: err }))?;
        }
        writer
            .flush()
            .map_err(|err| AppError::results(ResultsError::Write { source: err }))?;
        debug!("Encoded {} results", self.0.len());
        Ok(())
    }

    /// Reads results written by [`Results::encode`]. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error when reading fails or a line is not a valid result.
    pub fn decode<R: BufRead>(reader: R) -> AppResult<Self> {
        let mut results = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|err| AppError::results(ResultsError::Read { source: err }))?;
            if line.trim().is_empty() {
                continue;
            }
            let result: HitResult = serde_json::from_str(&line).map_err(|err| {
                AppError::results(ResultsError::Decode {
                    line: idx.saturating_add(1),
                    source: err,
                })
            })?;
            results.push(result);
        }
        Ok(Self(results))
    }
}
