//! Per-request outcomes and their newline-delimited JSON exchange format.
mod codec;
mod hit;
pub(crate) mod nanos;


pub use hit::{HitResult, INTEGRITY_FAILURE_CODE};

/// Ordered outcomes of one or more runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Results(Vec<HitResult>);

impl Results {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, result: HitResult) {
        self.0.push(result);
    }

    /// Stable ascending sort by timestamp; results without one come first.
    pub fn sort(&mut self) {
        self.0.sort_by_key(|result| result.timestamp);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HitResult> {
        self.0.iter()
    }

    #[must_use]
    pub fn first(&self) -> Option<&HitResult> {
        self.0.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&HitResult> {
        self.0.last()
    }
}

impl From<Vec<HitResult>> for Results {
    fn from(results: Vec<HitResult>) -> Self {
        Self(results)
    }
}

impl Extend<HitResult> for Results {
    fn extend<T: IntoIterator<Item = HitResult>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl FromIterator<HitResult> for Results {
    fn from_iter<T: IntoIterator<Item = HitResult>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Results {
    type Item = HitResult;
    type IntoIter = std::vec::IntoIter<HitResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Results {
    type Item = &'a HitResult;
    type IntoIter = std::slice::Iter<'a, HitResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
