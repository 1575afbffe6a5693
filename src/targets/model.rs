use std::path::Path;

use bytes::Bytes;
use reqwest::header::{CONTENT_LENGTH, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, Request, Url};

use crate::error::{AppError, AppResult, HttpError};

use super::file_spec::{BodySource, Checksum, FileSpec};
use super::headers::Headers;

/// User agent sent with every request.
pub const STRESS_USER_AGENT: &str = "stress 1.0";
const FORM_FILE_MIME: &str = "application/octet-stream";

/// A blueprint for one HTTP request.
#[derive(Debug, Clone)]
pub struct Target {
    method: Method,
    url: Url,
    raw_url: String,
    body: Bytes,
    source: BodySource,
    checksum: Option<Checksum>,
    headers: Headers,
}

impl Target {
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            raw_url: url.as_str().to_owned(),
            url,
            body: Bytes::new(),
            source: BodySource::Shared,
            checksum: None,
            headers: Headers::new(),
        }
    }

    pub(crate) fn from_parts(
        method: Method,
        url: Url,
        raw_url: &str,
        body: Bytes,
        spec: Option<FileSpec>,
        headers: Headers,
    ) -> Self {
        let (source, checksum) = spec.map_or((BodySource::Shared, None), |spec| {
            (spec.source, spec.checksum)
        });
        Self {
            method,
            url,
            raw_url: raw_url.to_owned(),
            body,
            source,
            checksum,
            headers,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: BodySource) -> Self {
        self.source = source;
        self
    }

    #[must_use]
    pub const fn with_checksum(mut self, checksum: Option<Checksum>) -> Self {
        self.checksum = checksum;
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// URL exactly as written in the target source.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.raw_url
    }

    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    #[must_use]
    pub const fn source(&self) -> &BodySource {
        &self.source
    }

    #[must_use]
    pub const fn checksum(&self) -> Option<&Checksum> {
        self.checksum.as_ref()
    }

    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Materializes the target into a request for `client`.
    ///
    /// Upload files are read on every call so that each hit sends the file's
    /// current content.
    ///
    /// # Errors
    ///
    /// Returns an error when an upload file cannot be read, a header is not
    /// valid HTTP, or the request cannot be assembled.
    pub fn build_request(&self, client: &Client) -> AppResult<Request> {
        let builder = client.request(self.method.clone(), self.url.clone());
        let builder = match &self.source {
            BodySource::Form { field, path } => builder.multipart(build_form(field, path)?),
            BodySource::File { path } => {
                let bytes = std::fs::read(path).map_err(|err| {
                    AppError::http(HttpError::ReadUploadFile {
                        path: path.clone(),
                        source: err,
                    })
                })?;
                builder.header(CONTENT_LENGTH, bytes.len()).body(bytes)
            }
            BodySource::Shared => builder.body(self.body.clone()),
        };

        let mut request = builder
            .build()
            .map_err(|err| AppError::http(HttpError::BuildRequestFailed { source: err }))?;

        let headers = request.headers_mut();
        for (name, value) in self.headers.iter() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
                AppError::http(HttpError::InvalidHeaderName {
                    name: name.to_owned(),
                    source: err,
                })
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|err| {
                AppError::http(HttpError::InvalidHeaderValue {
                    name: name.to_owned(),
                    source: err,
                })
            })?;
            headers.insert(header_name, header_value);
        }
        headers.insert(USER_AGENT, HeaderValue::from_static(STRESS_USER_AGENT));

        Ok(request)
    }
}

fn build_form(field: &str, path: &Path) -> AppResult<reqwest::multipart::Form> {
    let bytes = std::fs::read(path).map_err(|err| {
        AppError::http(HttpError::ReadFormFile {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(
            path.file_name()
                .and_then(|value| value.to_str())
                .unwrap_or("file")
                .to_owned(),
        )
        .mime_str(FORM_FILE_MIME)
        .map_err(|err| AppError::http(HttpError::BuildRequestFailed { source: err }))?;
    Ok(reqwest::multipart::Form::new().part(field.to_owned(), part))
}
