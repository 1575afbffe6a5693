use std::path::PathBuf;

use thiserror::Error;

use super::{ConfigError, HttpError, ReportError, ResultsError, TargetError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("{context} ({path}): {source}")]
    File {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Targets error: {0}")]
    Target(#[from] TargetError),
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
    #[error("Results error: {0}")]
    Results(#[from] ResultsError),
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    pub fn target<E>(error: E) -> Self
    where
        E: Into<TargetError>,
    {
        error.into().into()
    }

    pub fn http<E>(error: E) -> Self
    where
        E: Into<HttpError>,
    {
        error.into().into()
    }

    pub fn results<E>(error: E) -> Self
    where
        E: Into<ResultsError>,
    {
        error.into().into()
    }

    pub fn report<E>(error: E) -> Self
    where
        E: Into<ReportError>,
    {
        error.into().into()
    }

    pub fn file(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::File {
            context,
            path: path.into(),
            source,
        }
    }
}
