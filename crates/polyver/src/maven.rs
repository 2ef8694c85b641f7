//! Maven-style tokenizer: an incremental character-class scanner that
//! accepts any input string and produces a nested item tree. There is no
//! grammar to violate; separators and digit/letter transitions are the only
//! structural cues.

use crate::item::{Item, Sequence};
use crate::qualifier;

pub(crate) fn parse(version: &str) -> Sequence {
    // Unicode default lowercasing, independent of the process locale.
    let version = version.to_lowercase();

    // `current` is the innermost open sequence; suspended ancestors wait on
    // the stack and receive the nested group back when it closes.
    let mut current = Sequence::new();
    let mut parents: Vec<Sequence> = Vec::new();

    let mut is_digit = false;
    let mut is_combination = false;
    let mut start = 0;

    for (index, c) in version.char_indices() {
        if c == '.' {
            if index == start {
                current.push(Item::Number(0));
            } else {
                current.push(parse_item(is_combination, is_digit, &version[start..index]));
            }
            is_combination = false;
            start = index + 1;
        } else if c == '-' {
            if index == start {
                current.push(Item::Number(0));
            } else {
                // x-1 fuses into a combination instead of opening a group
                if !is_digit && next_is_digit(&version, index) {
                    is_combination = true;
                    continue;
                }
                current.push(parse_item(is_combination, is_digit, &version[start..index]));
            }
            start = index + 1;
            parents.push(std::mem::take(&mut current));
            is_combination = false;
        } else if c.is_ascii_digit() {
            if !is_digit && index > start {
                // x1
                is_combination = true;
                if !current.is_empty() {
                    parents.push(std::mem::take(&mut current));
                }
            }
            is_digit = true;
        } else {
            if is_digit && index > start {
                current.push(parse_item(is_combination, true, &version[start..index]));
                start = index;
                parents.push(std::mem::take(&mut current));
                is_combination = false;
            }
            is_digit = false;
        }
    }

    if version.len() > start {
        // 1.0.0.x1 orders like 1.0.0-x1: a trailing letter run gets its own
        // group when something already precedes it
        if !is_digit && !current.is_empty() {
            parents.push(std::mem::take(&mut current));
        }
        current.push(parse_item(is_combination, is_digit, &version[start..]));
    }

    loop {
        current.normalize();
        match parents.pop() {
            Some(mut parent) => {
                parent.push(Item::Sequence(current));
                current = parent;
            }
            None => break,
        }
    }
    current
}

fn next_is_digit(version: &str, index: usize) -> bool {
    version[index + 1..]
        .bytes()
        .next()
        .is_some_and(|byte| byte.is_ascii_digit())
}

fn parse_item(is_combination: bool, is_digit: bool, token: &str) -> Item {
    if is_combination {
        combination_item(&token.replace('-', ""))
    } else if is_digit {
        Item::parse_number(token)
    } else {
        Item::Qualifier(qualifier::resolve(token, false))
    }
}

/// Splits a fused token like `alpha1` at its first digit.
fn combination_item(token: &str) -> Item {
    let digits_at = token.find(|c: char| c.is_ascii_digit()).unwrap_or(0);
    let (letters, digits) = token.split_at(digits_at);
    Item::Combination {
        qualifier: qualifier::resolve(letters, true),
        suffix: Box::new(Item::parse_number(digits)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn canonical(version: &str) -> String {
        parse(version).to_string()
    }

    #[test]
    fn test_separator_handling() {
        assert_eq!(canonical("1.0"), "1");
        assert_eq!(canonical("1-0"), "1");
        assert_eq!(canonical("1-"), "1");
        assert_eq!(canonical("1..2"), "1.0.2");
        assert_eq!(canonical("1-1"), "1-1");
        assert_eq!(canonical("1-2-3"), "1-2-3");
    }

    #[test]
    fn test_digit_letter_transitions() {
        assert_eq!(canonical("1.0alpha1"), "1-alpha1");
        assert_eq!(canonical("1.0.0a"), "1-a");
        assert_eq!(canonical("11.a2"), "11-alpha2");
        assert_eq!(canonical("2.1b"), "2.1-b");
        assert_eq!(canonical("1cr"), "1-rc");
    }

    #[test]
    fn test_hyphen_digit_fusion() {
        // a hyphen right before a digit continues the run as a combination
        assert_eq!(canonical("1-alpha-1"), "1-alpha1");
        assert_eq!(canonical("1-sp-1"), "1-sp1");
        // after a digit run the hyphen opens a group as usual
        assert_eq!(canonical("1-1-snapshot"), "1-1-snapshot");
    }

    #[test]
    fn test_insignificant_zero_removal() {
        assert_eq!(canonical("0.x"), "x");
        assert_eq!(canonical("0.2"), "0.2");
        assert_eq!(canonical("1.0.rc"), "1-rc");
        assert_eq!(canonical("1.0-1"), "1.0-1");
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(canonical(""), "");
        assert_eq!(canonical("..."), "");
        assert_eq!(canonical("-"), "");
        assert_eq!(canonical("0.0.0"), "");
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(canonical("1-SNAPSHOT"), canonical("1-snapshot"));
        assert_eq!(canonical("1MileStone3"), canonical("1milestone3"));
    }
}
