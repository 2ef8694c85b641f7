use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::item::Sequence;
use crate::{Mode, maven, semver};

/// Error returned when comparing two versions parsed under different modes.
///
/// There is no implicit coercion between modes; mixing them in one
/// comparison is a usage error and is reported immediately.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cannot compare versions from different modes ({left} vs {right})")]
pub struct ModeMismatchError {
    pub left: Mode,
    pub right: Mode,
}

/// A parsed version: the original text, the item tree it decomposed into,
/// and the mode that governs its ordering.
///
/// Construction never fails, whatever the input looks like. The item tree
/// is immutable once built; the only deferred state is the cached canonical
/// string, which is a pure function of the tree.
#[derive(Debug, Clone)]
pub struct Version {
    original: String,
    mode: Mode,
    items: Sequence,
    canonical: OnceLock<String>,
}

impl Version {
    /// Parses a version under the default mode ([`Mode::Maven`]).
    pub fn new(version: impl Into<String>) -> Self {
        Self::with_mode(version, Mode::default())
    }

    /// Parses a version under an explicit mode.
    pub fn with_mode(version: impl Into<String>, mode: Mode) -> Self {
        let original = version.into();
        let items = match mode {
            Mode::Maven => maven::parse(&original),
            Mode::Semver | Mode::Mixed => semver::parse(&original, mode),
        };
        Self {
            original,
            mode,
            items,
            canonical: OnceLock::new(),
        }
    }

    /// The input text, verbatim.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The canonical text form: computed once, deterministic, and parseable
    /// back to a value with the same canonical form.
    pub fn canonical(&self) -> &str {
        self.canonical.get_or_init(|| self.items.to_string())
    }

    /// Compares two versions of the same mode.
    pub fn try_cmp(&self, other: &Version) -> Result<Ordering, ModeMismatchError> {
        if self.mode != other.mode {
            return Err(ModeMismatchError {
                left: self.mode,
                right: other.mode,
            });
        }
        Ok(self.items.cmp_sequences(&other.items, self.mode))
    }

    pub fn less_than(&self, other: &Version) -> Result<bool, ModeMismatchError> {
        Ok(self.try_cmp(other)?.is_lt())
    }

    pub fn greater_than(&self, other: &Version) -> Result<bool, ModeMismatchError> {
        Ok(self.try_cmp(other)?.is_gt())
    }

    pub fn equal_to(&self, other: &Version) -> Result<bool, ModeMismatchError> {
        Ok(self.try_cmp(other)?.is_eq())
    }
}

/// Parses both strings under one mode and compares them. A mode mismatch is
/// impossible by construction.
pub fn compare(left: &str, right: &str, mode: Mode) -> Ordering {
    let left = Version::with_mode(left, mode);
    let right = Version::with_mode(right, mode);
    left.items.cmp_sequences(&right.items, mode)
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.try_cmp(other) == Ok(Ordering::Equal)
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mode.hash(state);
        self.items.hash_ranked(self.mode, state);
    }
}

impl PartialOrd for Version {
    /// `None` exactly when the modes differ.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl FromStr for Version {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Infallible> {
        Ok(Version::new(s))
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let version = String::deserialize(deserializer)?;
        Ok(Version::new(version))
    }
}
