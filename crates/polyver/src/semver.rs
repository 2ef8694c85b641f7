//! SemVer-style tokenizer: a pattern-based per-dot-segment scanner with
//! fixed-arity padding and truncation. Used for both the semver and mixed
//! modes; the two differ only in qualifier table resolution.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::Mode;
use crate::item::{Item, Sequence};
use crate::qualifier;

/// Matches, in priority order: a one-letter qualifier fused with digits, a
/// digit run, a letter run. Anything else in a segment is skipped.
static SEGMENT_ITEMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<short>[abm])(?P<short_digits>[0-9]+)|(?P<number>[0-9]+)|(?P<word>[a-zA-Z]+)")
        .expect("segment pattern is valid")
});

pub(crate) fn parse(version: &str, mode: Mode) -> Sequence {
    // Unicode default lowercasing, independent of the process locale.
    let version = version.to_lowercase();
    // build metadata never participates in ordering
    let version = match version.find('+') {
        Some(at) => &version[..at],
        None => version.as_str(),
    };

    let mut current = Sequence::new();
    let mut parents: Vec<Sequence> = Vec::new();

    for segment in version.split('.') {
        for (index, captures) in SEGMENT_ITEMS.captures_iter(segment).enumerate() {
            if index != 0 {
                parents.push(std::mem::take(&mut current));
            }

            if let Some(number) = captures.name("number") {
                current.push(Item::parse_number(number.as_str()));
                continue;
            }

            // qualifiers presuppose the three leading numeric components
            fill_missing_leading(&mut parents, &mut current);

            if let (Some(short), Some(digits)) =
                (captures.name("short"), captures.name("short_digits"))
            {
                // a1 stands for alpha-1, with the digits in their own group
                current.push(Item::Qualifier(resolve_qualifier(short.as_str(), true, mode)));
                parents.push(std::mem::take(&mut current));
                current.push(Item::parse_number(digits.as_str()));
            } else if let Some(word) = captures.name("word") {
                current.push(Item::Qualifier(resolve_qualifier(word.as_str(), false, mode)));
            }
        }
    }

    // 2.0 parses like 2.0.0
    fill_missing_leading(&mut parents, &mut current);

    let mut root = current;
    while let Some(mut parent) = parents.pop() {
        parent.push(Item::Sequence(root));
        root = parent;
    }

    // 2.0.0.0 parses like 2.0.0
    root.strip_trailing_zeros();
    root
}

/// Pads the top-level sequence with zeros until major, minor and patch are
/// all present. The zeros go in front of any open nested group, so `1-foo`
/// becomes `[1, 0, [foo]]`.
fn fill_missing_leading(parents: &mut Vec<Sequence>, current: &mut Sequence) {
    match parents.first_mut() {
        // the open nested chain counts as one trailing element of the root
        Some(root) => {
            while root.len() + 1 < 3 {
                root.push(Item::Number(0));
            }
        }
        None => {
            while current.len() < 3 {
                current.push(Item::Number(0));
            }
        }
    }
}

fn resolve_qualifier(value: &str, followed_by_digit: bool, mode: Mode) -> String {
    if mode == Mode::Semver {
        // the qualifier table is bypassed entirely in semver mode
        value.to_string()
    } else {
        qualifier::resolve(value, followed_by_digit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn canonical(version: &str, mode: Mode) -> String {
        parse(version, mode).to_string()
    }

    #[test]
    fn test_major_minor_patch_padding() {
        assert_eq!(canonical("", Mode::Semver), "0.0.0");
        assert_eq!(canonical("1", Mode::Semver), "1.0.0");
        assert_eq!(canonical("2.0", Mode::Semver), "2.0.0");
        assert_eq!(canonical("1.2.3", Mode::Semver), "1.2.3");
    }

    #[test]
    fn test_extra_trailing_zeros_are_dropped() {
        assert_eq!(canonical("2.0.0.0", Mode::Semver), "2.0.0");
        assert_eq!(canonical("1.2.3.0.0", Mode::Semver), "1.2.3");
        assert_eq!(canonical("1.2.3.4", Mode::Semver), "1.2.3.4");
    }

    #[test]
    fn test_build_metadata_is_discarded() {
        assert_eq!(canonical("1.2.0+bar", Mode::Semver), "1.2.0");
        assert_eq!(canonical("1.2.3-rc1+20250102", Mode::Semver), canonical("1.2.3-rc1", Mode::Semver));
    }

    #[test]
    fn test_prerelease_groups() {
        assert_eq!(canonical("1.0.0-alpha", Mode::Semver), "1.0.0-alpha");
        assert_eq!(canonical("1.0.0-alpha.1", Mode::Semver), "1.0.0-alpha.1");
        assert_eq!(canonical("1.0.0-beta.-2", Mode::Semver), "1.0.0-beta.2");
    }

    #[test]
    fn test_padding_lands_before_open_groups() {
        assert_eq!(canonical("1-foo", Mode::Semver), "1.0-foo");
        assert_eq!(canonical("2-1", Mode::Semver), "2.0-1");
    }

    #[test]
    fn test_short_qualifiers_expand_per_mode() {
        // the one-letter forms resolve through the table only in mixed mode
        assert_eq!(canonical("1.2.3-a1", Mode::Mixed), "1.2.3-alpha-1");
        assert_eq!(canonical("1.2.3-a1", Mode::Semver), "1.2.3-a-1");
        assert_eq!(canonical("1.2.3-cr1", Mode::Mixed), canonical("1.2.3-rc1", Mode::Mixed));
    }
}
