#[cfg(test)]
use proptest_derive::Arbitrary;
use serde::{Deserialize, Serialize};

/// Error returned when a mode name cannot be recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown comparison mode: {mode}")]
pub struct UnknownModeError {
    pub mode: String,
}

/// Selects the ordering semantics a version is parsed and compared under.
///
/// Using an enum with no wildcard fallback ensures the compiler enforces
/// exhaustive handling: every comparison rule that depends on the mode has
/// to spell out all three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(test, derive(Arbitrary))]
pub enum Mode {
    /// Well-known pre-release qualifiers sort before the plain release and
    /// everything else after it, with alias and short-name resolution.
    #[default]
    Maven,
    /// Any pre-release information sorts before the plain release;
    /// qualifiers compare by the lexical order of their literal text.
    Semver,
    /// Any pre-release information sorts before the plain release, but
    /// qualifiers follow the Maven ranking, aliases and short names.
    Mixed,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Maven => "maven",
            Mode::Semver => "semver",
            Mode::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maven" => Ok(Mode::Maven),
            "semver" => Ok(Mode::Semver),
            "mixed" => Ok(Mode::Mixed),
            _ => Err(UnknownModeError { mode: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_default_mode() {
        assert_eq!(Mode::default(), Mode::Maven);
    }

    #[test]
    fn test_round_trip_mode_names() {
        for mode in [Mode::Maven, Mode::Semver, Mode::Mixed] {
            assert_eq!(Mode::from_str(mode.as_str()), Ok(mode));
        }
    }

    #[test]
    fn test_unknown_mode() {
        let err = Mode::from_str("strict").unwrap_err();
        assert_eq!(err.mode, "strict");
    }
}
