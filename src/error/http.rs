use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Targets list was empty.")]
    TargetsEmpty,
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to build request: {source}")]
    BuildRequestFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid header name '{name}': {source}")]
    InvalidHeaderName {
        name: String,
        #[source]
        source: reqwest::header::InvalidHeaderName,
    },
    #[error("Invalid value for header '{name}': {source}")]
    InvalidHeaderValue {
        name: String,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("Post file: ({path}): {source}")]
    ReadUploadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Form file: ({path}): {source}")]
    ReadFormFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
