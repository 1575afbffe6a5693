use thiserror::Error;

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("Invalid request format: `{line}`")]
    TooFewTokens { line: String },
    #[error("Invalid method '{method}' in `{line}`")]
    InvalidMethod { line: String, method: String },
    #[error("Invalid inline header '{token}' in `{line}`. Expected 'key:value'")]
    InvalidInlineHeader { line: String, token: String },
    #[error("No URL found in `{line}`")]
    MissingUrl { line: String },
    #[error("Invalid URL '{url}' in `{line}`: {source}")]
    InvalidUrl {
        line: String,
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("File spec ({spec}): illegal in `{line}`")]
    InvalidFileSpec { line: String, spec: String },
    #[error("Unexpected token '{token}' after file spec in `{line}`")]
    TrailingToken { line: String, token: String },
    #[error("Failed to read targets: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },
}
