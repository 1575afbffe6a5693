use std::io::BufRead;

use bytes::Bytes;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use reqwest::{Method, Url};

use crate::error::{AppError, AppResult, TargetError};

use super::file_spec::FileSpec;
use super::headers::Headers;
use super::model::Target;

const COMMENT_PREFIX: &str = "//";
const URL_MARKER: &str = "http";

/// Ordered list of targets for one run.
#[derive(Debug, Clone, Default)]
pub struct Targets(Vec<Target>);

impl Targets {
    /// Parses target lines of the form `METHOD [key:value ...] URL [fileSpec]`.
    ///
    /// Blank lines and `//` comments are skipped. `body` is shared by every
    /// target that does not upload a file and `headers` is the base header set
    /// each line's inline headers are layered over.
    ///
    /// # Errors
    ///
    /// Returns the first malformed line as a [`TargetError`].
    pub fn parse<I, S>(lines: I, body: &Bytes, headers: &Headers) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut targets = Vec::new();
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }
            targets.push(parse_line(line, body, headers).map_err(AppError::target)?);
        }
        Ok(Self(targets))
    }

    /// Reads target lines from `reader` and parses them.
    ///
    /// # Errors
    ///
    /// Returns an error when reading fails or a line is malformed.
    pub fn from_reader<R: BufRead>(reader: R, body: &Bytes, headers: &Headers) -> AppResult<Self> {
        let lines = reader
            .lines()
            .collect::<Result<Vec<String>, std::io::Error>>()
            .map_err(|err| AppError::target(TargetError::Read { source: err }))?;
        Self::parse(lines, body, headers)
    }

    /// Deterministic Fisher-Yates shuffle.
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.0.shuffle(&mut rng);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Target> {
        self.0.get(index)
    }

    /// Target for the `index`-th hit, wrapping around the list.
    #[must_use]
    pub fn round_robin(&self, index: u64) -> Option<&Target> {
        let len = u64::try_from(self.0.len()).ok()?;
        let slot = index.checked_rem(len)?;
        self.0.get(usize::try_from(slot).ok()?)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.0.iter()
    }
}

impl From<Vec<Target>> for Targets {
    fn from(targets: Vec<Target>) -> Self {
        Self(targets)
    }
}

impl<'a> IntoIterator for &'a Targets {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn parse_line(line: &str, body: &Bytes, headers: &Headers) -> Result<Target, TargetError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (method_token, rest) = match tokens.as_slice() {
        [method, rest @ ..] if !rest.is_empty() => (*method, rest),
        _ => {
            return Err(TargetError::TooFewTokens {
                line: line.to_owned(),
            });
        }
    };

    let method =
        Method::from_bytes(method_token.as_bytes()).map_err(|_err| TargetError::InvalidMethod {
            line: line.to_owned(),
            method: method_token.to_owned(),
        })?;

    let url_pos = rest
        .iter()
        .position(|token| token.contains(URL_MARKER))
        .ok_or_else(|| TargetError::MissingUrl {
            line: line.to_owned(),
        })?;

    let mut inline = Vec::with_capacity(url_pos);
    for token in rest.iter().take(url_pos) {
        inline.push(parse_inline_header(line, token)?);
    }

    let raw_url = rest.get(url_pos).copied().ok_or_else(|| TargetError::MissingUrl {
        line: line.to_owned(),
    })?;
    let url = Url::parse(raw_url).map_err(|err| TargetError::InvalidUrl {
        line: line.to_owned(),
        url: raw_url.to_owned(),
        source: err,
    })?;

    let mut tail = rest.iter().skip(url_pos.saturating_add(1));
    let spec = tail
        .next()
        .map(|raw| {
            FileSpec::parse(raw).ok_or_else(|| TargetError::InvalidFileSpec {
                line: line.to_owned(),
                spec: (*raw).to_owned(),
            })
        })
        .transpose()?;
    if let Some(extra) = tail.next() {
        return Err(TargetError::TrailingToken {
            line: line.to_owned(),
            token: (*extra).to_owned(),
        });
    }

    let spec = if method == Method::POST {
        spec
    } else {
        spec.map(FileSpec::into_checksum_only)
    };

    Ok(Target::from_parts(
        method,
        url,
        raw_url,
        body.clone(),
        spec,
        headers.merged(&inline),
    ))
}

fn parse_inline_header(line: &str, token: &str) -> Result<(String, String), TargetError> {
    match token.split_once(':') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
        _ => Err(TargetError::InvalidInlineHeader {
            line: line.to_owned(),
            token: token.to_owned(),
        }),
    }
}
