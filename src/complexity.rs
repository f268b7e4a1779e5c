//! Default password complexity rule
//!
//! Mirrors the Windows "password must meet complexity requirements" policy:
//! an entry must not contain any of the excluded names (3+ characters,
//! case-insensitive) and must use at least three of the four character
//! classes below, with a length of at least six characters.

use regex::RegexSet;
use std::sync::OnceLock;

/// Minimum number of character classes an entry has to use
pub const MIN_CLASSES: usize = 3;

/// Minimum entry length under the default policy
pub const MIN_LENGTH: usize = 6;

/// Names shorter than this are never matched
pub const MIN_NAME_LENGTH: usize = 3;

/// Character class patterns
pub mod classes {
    /// Latin uppercase, including accented uppercase letters
    pub const UPPERCASE: &str = r"[A-Z\x{C0}-\x{D6}\x{D8}-\x{DE}]";

    /// Latin lowercase, including accented lowercase letters
    pub const LOWERCASE: &str = r"[a-z\x{DF}-\x{F6}\x{F8}-\x{FF}]";

    /// Decimal digits
    pub const DIGIT: &str = r"[0-9]";

    /// Non-alphanumeric symbols
    pub const SYMBOL: &str = r#"[~!@#$%^&*_\-+=`|\\(){}\[\]:;"'<>,.?/]"#;
}

fn class_set() -> &'static RegexSet {
    static CLASSES: OnceLock<RegexSet> = OnceLock::new();
    CLASSES.get_or_init(|| {
        RegexSet::new([
            classes::UPPERCASE,
            classes::LOWERCASE,
            classes::DIGIT,
            classes::SYMBOL,
        ])
        .expect("character class patterns are valid")
    })
}

/// Number of character classes present in `entry`
pub fn class_count(entry: &str) -> usize {
    class_set().matches(entry).iter().count()
}

/// Default complexity rule with its excluded names prepared for matching
#[derive(Debug, Clone, Default)]
pub struct ComplexityRule {
    /// Lowercased names, already filtered to the minimum name length
    names: Vec<String>,
}

impl ComplexityRule {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        let names = names
            .iter()
            .map(|n| fold_case(n.as_ref()))
            .filter(|n| n.chars().count() >= MIN_NAME_LENGTH)
            .collect();

        Self { names }
    }

    /// Check whether `entry` satisfies the rule
    pub fn is_complex(&self, entry: &str) -> bool {
        if self.contains_name(entry) {
            return false;
        }

        entry.chars().count() >= MIN_LENGTH && class_count(entry) >= MIN_CLASSES
    }

    fn contains_name(&self, entry: &str) -> bool {
        if self.names.is_empty() {
            return false;
        }

        let entry = fold_case(entry);
        self.names.iter().any(|name| entry.contains(name.as_str()))
    }
}

/// Lowercase char by char, without context-dependent mappings like final sigma
fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// One-shot form of [`ComplexityRule::is_complex`]
pub fn is_complex<S: AsRef<str>>(entry: &str, excluded_names: &[S]) -> bool {
    ComplexityRule::new(excluded_names).is_complex(entry)
}
