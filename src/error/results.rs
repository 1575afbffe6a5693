use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("Failed to encode result: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write results: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read results: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed result on line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
