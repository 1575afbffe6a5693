use std::collections::BTreeMap;
use std::sync::Arc;

/// Immutable header set shared between targets.
///
/// Names are stored lower-cased so that later writes replace earlier ones
/// regardless of the casing used on the command line or in a target line.
/// Cloning is cheap; [`Headers::merged`] copies the underlying map only when
/// there is something to add.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Arc<BTreeMap<String, String>>);

impl Headers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a header set from `(name, value)` pairs, last value wins.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let map = pairs
            .into_iter()
            .map(|(name, value)| (name.as_ref().to_ascii_lowercase(), value.into()))
            .collect();
        Self(Arc::new(map))
    }

    /// Returns a copy of this set with `extra` layered on top.
    ///
    /// `self` is never modified, so inline headers of one target cannot leak
    /// into the base set handed to the others.
    #[must_use]
    pub fn merged(&self, extra: &[(String, String)]) -> Self {
        let mut merged = self.clone();
        if extra.is_empty() {
            return merged;
        }
        let map = Arc::make_mut(&mut merged.0);
        for (name, value) in extra {
            map.insert(name.to_ascii_lowercase(), value.clone());
        }
        merged
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
