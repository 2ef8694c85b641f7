use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use num_bigint::BigUint;

use crate::Mode;
use crate::qualifier;

/// Digit runs at most this long (after leading zeros are stripped) fit in a
/// `u64`; longer runs go through `BigUint`.
const MAX_U64_DIGITS: usize = 18;

/// One component of a parsed version.
///
/// The set of kinds is closed; every ordering rule matches exhaustively so
/// that adding a kind forces every rule to be revisited. The "absent"
/// operand used when two sequences differ in length is not a variant, it is
/// the [`Item::cmp_absent`] axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Item {
    Number(u64),
    BigNumber(BigUint),
    Qualifier(String),
    Combination { qualifier: String, suffix: Box<Item> },
    Sequence(Sequence),
}

impl Item {
    /// Parses a digit run, ignoring leading zeros.
    pub(crate) fn parse_number(digits: &str) -> Item {
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            Item::Number(0)
        } else if digits.len() <= MAX_U64_DIGITS {
            // 18 decimal digits always fit in a u64
            let value = digits
                .bytes()
                .fold(0u64, |acc, digit| acc * 10 + u64::from(digit - b'0'));
            Item::Number(value)
        } else {
            let value = digits
                .bytes()
                .fold(BigUint::from(0u32), |acc, digit| {
                    acc * 10u32 + u32::from(digit - b'0')
                });
            Item::BigNumber(value)
        }
    }

    /// Kind-specific emptiness: the values that compare equal to nothing at
    /// all. A combination is never empty.
    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Item::Number(value) => *value == 0,
            Item::BigNumber(value) => *value == BigUint::from(0u32),
            Item::Qualifier(qualifier) => qualifier.is_empty(),
            Item::Combination { .. } => false,
            Item::Sequence(sequence) => sequence.is_empty(),
        }
    }

    pub(crate) fn cmp_items(&self, other: &Item, mode: Mode) -> Ordering {
        match (self, other) {
            (Item::Number(a), Item::Number(b)) => a.cmp(b),
            (Item::Number(a), Item::BigNumber(b)) => BigUint::from(*a).cmp(b),
            (Item::BigNumber(a), Item::Number(b)) => a.cmp(&BigUint::from(*b)),
            (Item::BigNumber(a), Item::BigNumber(b)) => a.cmp(b),
            // 1.1 > 1.alpha, 1.1 > 1-sp, 1.1 > 1-1
            (Item::Number(_) | Item::BigNumber(_), _) => Ordering::Greater,
            (_, Item::Number(_) | Item::BigNumber(_)) => Ordering::Less,

            (Item::Qualifier(a), Item::Qualifier(b)) => qualifier_cmp(a, b, mode),
            (Item::Qualifier(a), Item::Combination { qualifier, .. }) => {
                match qualifier_cmp(a, qualifier, mode) {
                    // x < x1
                    Ordering::Equal => Ordering::Less,
                    ordering => ordering,
                }
            }
            (Item::Combination { qualifier, .. }, Item::Qualifier(b)) => {
                match qualifier_cmp(qualifier, b, mode) {
                    Ordering::Equal => Ordering::Greater,
                    ordering => ordering,
                }
            }
            (
                Item::Combination { qualifier: a, suffix: a_suffix },
                Item::Combination { qualifier: b, suffix: b_suffix },
            ) => match qualifier_cmp(a, b, mode) {
                Ordering::Equal => a_suffix.cmp_items(b_suffix, mode),
                ordering => ordering,
            },

            // 1.x2 < 1-x3 in maven mode; reversed placement otherwise
            (Item::Qualifier(_), Item::Sequence(_)) => match mode {
                Mode::Maven => Ordering::Less,
                Mode::Semver | Mode::Mixed => Ordering::Greater,
            },
            (Item::Sequence(_), Item::Qualifier(_)) => match mode {
                Mode::Maven => Ordering::Greater,
                Mode::Semver | Mode::Mixed => Ordering::Less,
            },

            // 1-1 > 1-sp
            (Item::Combination { .. }, Item::Sequence(_)) => Ordering::Less,
            (Item::Sequence(_), Item::Combination { .. }) => Ordering::Greater,

            (Item::Sequence(a), Item::Sequence(b)) => a.cmp_sequences(b, mode),
        }
    }

    /// Compares against the virtual absent value used when the other
    /// sequence has run out of elements.
    pub(crate) fn cmp_absent(&self, mode: Mode) -> Ordering {
        match self {
            // 1.0 == 1, 1.1 > 1
            Item::Number(_) | Item::BigNumber(_) => {
                if self.is_empty() {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            }
            Item::Qualifier(qualifier) => qualifier_cmp_absent(qualifier, mode),
            // 1-rc1 < 1, 1-ga1 > 1
            Item::Combination { qualifier, suffix } => {
                match qualifier_cmp_absent(qualifier, mode) {
                    Ordering::Equal => suffix.cmp_absent(mode),
                    ordering => ordering,
                }
            }
            Item::Sequence(sequence) => sequence.cmp_absent(mode),
        }
    }

    fn hash_ranked<H: Hasher>(&self, mode: Mode, state: &mut H) {
        match self {
            Item::Number(value) => {
                0u8.hash(state);
                value.hash(state);
            }
            Item::BigNumber(value) => {
                1u8.hash(state);
                value.hash(state);
            }
            Item::Qualifier(qualifier) => {
                2u8.hash(state);
                hash_qualifier(qualifier, mode, state);
            }
            Item::Combination { qualifier, suffix } => {
                3u8.hash(state);
                hash_qualifier(qualifier, mode, state);
                suffix.hash_ranked(mode, state);
            }
            Item::Sequence(sequence) => {
                4u8.hash(state);
                sequence.hash_ranked(mode, state);
            }
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Number(value) => write!(f, "{value}"),
            Item::BigNumber(value) => write!(f, "{value}"),
            Item::Qualifier(qualifier) => f.write_str(qualifier),
            Item::Combination { qualifier, suffix } => write!(f, "{qualifier}{suffix}"),
            Item::Sequence(sequence) => write!(f, "{sequence}"),
        }
    }
}

fn qualifier_cmp(a: &str, b: &str, mode: Mode) -> Ordering {
    if mode == Mode::Semver {
        a.cmp(b)
    } else {
        qualifier::rank(a).cmp(&qualifier::rank(b))
    }
}

fn qualifier_cmp_absent(qualifier: &str, mode: Mode) -> Ordering {
    match mode {
        // 1-rc < 1, 1-ga == 1, 1-abc > 1
        Mode::Maven => qualifier::rank(qualifier).cmp(&qualifier::release_rank()),
        // any pre-release tag is older than the release it qualifies
        Mode::Semver | Mode::Mixed => Ordering::Less,
    }
}

fn hash_qualifier<H: Hasher>(qualifier: &str, mode: Mode, state: &mut H) {
    if mode == Mode::Semver {
        qualifier.hash(state);
    } else {
        qualifier::rank(qualifier).hash(state);
    }
}

/// An ordered group of sibling items, used both for the top-level version
/// and for every nested group a separator introduces.
///
/// Not a general collection: it only grows during tokenization and is
/// read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Sequence {
    items: Vec<Item>,
}

impl Sequence {
    pub(crate) fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub(crate) fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops insignificant empty items, walking from the end backward: an
    /// empty item goes away when it is last, when a qualifier follows it, or
    /// when the following sequence opens with a qualifier or combination.
    /// An implicit zero in front of further numeric structure stays.
    pub(crate) fn normalize(&mut self) {
        for index in (0..self.items.len()).rev() {
            if !self.items[index].is_empty() {
                continue;
            }
            let removable = match self.items.get(index + 1) {
                None => true,
                Some(Item::Qualifier(_)) => true,
                Some(Item::Sequence(sequence)) => matches!(
                    sequence.items.first(),
                    Some(Item::Qualifier(_) | Item::Combination { .. })
                ),
                Some(_) => false,
            };
            if removable {
                self.items.remove(index);
            }
        }
    }

    /// Strips empty trailing elements, recursing into trailing nested
    /// sequences, while more than the three leading components remain.
    pub(crate) fn strip_trailing_zeros(&mut self) {
        while self.items.len() > 3 {
            let empty = match self.items.last_mut() {
                Some(Item::Sequence(sequence)) => {
                    sequence.strip_trailing_zeros();
                    sequence.is_empty()
                }
                Some(item) => item.is_empty(),
                None => false,
            };
            if empty {
                self.items.pop();
            } else {
                break;
            }
        }
    }

    /// Lock-step comparison; once one side runs out, the remaining items
    /// compare against absent.
    pub(crate) fn cmp_sequences(&self, other: &Self, mode: Mode) -> Ordering {
        let len = self.items.len().max(other.items.len());
        for position in 0..len {
            let result = match (self.items.get(position), other.items.get(position)) {
                (Some(left), Some(right)) => left.cmp_items(right, mode),
                (Some(left), None) => left.cmp_absent(mode),
                (None, Some(right)) => right.cmp_absent(mode).reverse(),
                (None, None) => Ordering::Equal,
            };
            if result != Ordering::Equal {
                return result;
            }
        }
        Ordering::Equal
    }

    pub(crate) fn cmp_absent(&self, mode: Mode) -> Ordering {
        match mode {
            // 1-0 == 1; otherwise the whole list decides, not just its head
            Mode::Maven => self
                .items
                .iter()
                .map(|item| item.cmp_absent(mode))
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal),
            Mode::Semver | Mode::Mixed => Ordering::Less,
        }
    }

    /// Hashes the comparison-relevant projection of the tree: numbers by
    /// value, qualifiers by rank, and trailing elements that compare equal
    /// to absent dropped, so that compare-equal values hash identically.
    pub(crate) fn hash_ranked<H: Hasher>(&self, mode: Mode, state: &mut H) {
        let mut len = self.items.len();
        while len > 0 && self.items[len - 1].cmp_absent(mode) == Ordering::Equal {
            len -= 1;
        }
        len.hash(state);
        for item in &self.items[..len] {
            item.hash_ranked(mode, state);
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, item) in self.items.iter().enumerate() {
            if position > 0 {
                let separator = if matches!(item, Item::Sequence(_)) { '-' } else { '.' };
                write!(f, "{separator}")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}
