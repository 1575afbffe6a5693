use std::path::PathBuf;

use md5::{Digest, Md5};

const FORM_PREFIX: &str = "form:";
const DEFAULT_FORM_FIELD: &str = "file";
/// Hex length of an MD5 digest.
pub const CHECKSUM_HEX_LEN: usize = 32;

/// Expected MD5 digest of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checksum([u8; 16]);

impl Checksum {
    /// Parses a 32 character hexadecimal digest. Anything else is `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.len() != CHECKSUM_HEX_LEN {
            return None;
        }
        let mut bytes = [0u8; 16];
        hex::decode_to_slice(value, &mut bytes).ok()?;
        Some(Self(bytes))
    }

    #[must_use]
    pub fn of(body: &[u8]) -> Self {
        Self(Md5::digest(body).into())
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub(crate) fn matches(&self, hasher: Md5) -> bool {
        let digest: [u8; 16] = hasher.finalize().into();
        digest == self.0
    }
}

/// Where the body of a target comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySource {
    /// The body shared by every target of the run.
    Shared,
    /// A file sent verbatim as the request body.
    File { path: PathBuf },
    /// A file sent as a multipart form upload in field `field`.
    Form { field: String, path: PathBuf },
}

/// Parsed trailing token of a target line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub source: BodySource,
    pub checksum: Option<Checksum>,
}

impl FileSpec {
    /// Parses `form:<file>`, `form:<field>:<file>` or `<file>`, each optionally
    /// followed by `:<32 hex digest>`.
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.strip_prefix(FORM_PREFIX) {
            Some(rest) => parse_form(rest),
            None => parse_file(raw),
        }
    }

    /// Drops the body branch, keeping only the checksum.
    pub(crate) fn into_checksum_only(self) -> Self {
        Self {
            source: BodySource::Shared,
            checksum: self.checksum,
        }
    }
}

fn parse_form(rest: &str) -> Option<FileSpec> {
    let parts: Vec<&str> = rest.split(':').collect();
    let (field, path, checksum) = match parts.as_slice() {
        [path] => (DEFAULT_FORM_FIELD, *path, None),
        [first, second] => match Checksum::parse(second) {
            Some(checksum) => (DEFAULT_FORM_FIELD, *first, Some(checksum)),
            None => (*first, *second, None),
        },
        [field, path, digest] => (*field, *path, Some(Checksum::parse(digest)?)),
        _ => return None,
    };
    if field.is_empty() || path.is_empty() {
        return None;
    }
    Some(FileSpec {
        source: BodySource::Form {
            field: field.to_owned(),
            path: PathBuf::from(path),
        },
        checksum,
    })
}

fn parse_file(raw: &str) -> Option<FileSpec> {
    let (path, checksum) = match raw.rsplit_once(':') {
        Some((path, digest)) => match Checksum::parse(digest) {
            Some(checksum) => (path, Some(checksum)),
            None => (raw, None),
        },
        None => (raw, None),
    };
    if path.is_empty() {
        return None;
    }
    Some(FileSpec {
        source: BodySource::File {
            path: PathBuf::from(path),
        },
        checksum,
    })
}
