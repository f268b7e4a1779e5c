//! Predicate compilation
//!
//! Turns a [`PolicySpec`] into a [`CompiledPolicy`]: the list of active
//! constraints, each prepared once so that checking an entry does no
//! per-run setup work. Unset options do not produce a constraint at all.

use crate::complexity::ComplexityRule;
use crate::policy::{CaseSensitivity, Inclusion, LengthBound, PolicySpec};
use std::collections::BTreeSet;
use std::fmt;

/// Notice that an explicit option narrows the default policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Advisory {
    ExactLengthOverride,
    MinLengthOverride,
    MaxLengthOverride,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let option = match self {
            Self::ExactLengthOverride => "length",
            Self::MinLengthOverride => "min-length",
            Self::MaxLengthOverride => "max-length",
        };
        write!(
            f,
            "'{}' overrides the length requirement of the default Windows password policy",
            option
        )
    }
}

/// A single active constraint
#[derive(Debug, Clone)]
enum Constraint {
    Complexity(ComplexityRule),
    Length(LengthBound),
    MinUppercase(usize),
    Prefix(String, CaseSensitivity),
    Suffix(String, CaseSensitivity),
    Exclude(Vec<char>),
    AnyOf(Vec<char>),
    AllOf(Vec<char>),
}

impl Constraint {
    #[inline]
    fn admits(&self, entry: &str) -> bool {
        match self {
            Self::Complexity(rule) => rule.is_complex(entry),
            Self::Length(bound) => bound.admits(entry.chars().count()),
            Self::MinUppercase(min) => entry.chars().filter(|c| c.is_uppercase()).count() >= *min,
            Self::Prefix(prefix, CaseSensitivity::Sensitive) => entry.starts_with(prefix.as_str()),
            Self::Prefix(prefix, CaseSensitivity::Insensitive) => {
                starts_with_ignore_case(entry, prefix)
            }
            Self::Suffix(suffix, CaseSensitivity::Sensitive) => entry.ends_with(suffix.as_str()),
            Self::Suffix(suffix, CaseSensitivity::Insensitive) => {
                ends_with_ignore_case(entry, suffix)
            }
            Self::Exclude(chars) => !entry.contains(chars.as_slice()),
            Self::AnyOf(chars) => entry.contains(chars.as_slice()),
            Self::AllOf(chars) => chars.iter().all(|&c| entry.contains(c)),
        }
    }
}

fn starts_with_ignore_case(entry: &str, prefix: &str) -> bool {
    let mut entry = entry.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| entry.next() == Some(p))
}

fn ends_with_ignore_case(entry: &str, suffix: &str) -> bool {
    let mut entry = entry.chars().rev().flat_map(|c| c.to_lowercase().rev());
    suffix
        .chars()
        .rev()
        .flat_map(|c| c.to_lowercase().rev())
        .all(|s| entry.next() == Some(s))
}

/// Composite decision function for one run
///
/// Immutable after compilation and `Sync`, so workers share it by reference.
#[derive(Debug, Clone, Default)]
pub struct CompiledPolicy {
    constraints: Vec<Constraint>,
    advisories: BTreeSet<Advisory>,
}

impl CompiledPolicy {
    /// Check if an entry passes every active constraint
    #[inline]
    pub fn matches(&self, entry: &str) -> bool {
        self.constraints.iter().all(|c| c.admits(entry))
    }

    /// Advisories raised by this policy, one per kind
    pub fn advisories(&self) -> impl Iterator<Item = Advisory> + '_ {
        self.advisories.iter().copied()
    }

    /// Number of active constraints
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

/// Compile a policy into its decision function
pub fn compile(spec: &PolicySpec) -> CompiledPolicy {
    let mut constraints = Vec::new();
    let mut advisories = BTreeSet::new();

    if let Some(names) = spec.default_policy() {
        constraints.push(Constraint::Complexity(ComplexityRule::new(names)));

        match spec.length() {
            LengthBound::Any => {}
            LengthBound::Exact(_) => {
                advisories.insert(Advisory::ExactLengthOverride);
            }
            LengthBound::Range { min, max } => {
                if min.is_some() {
                    advisories.insert(Advisory::MinLengthOverride);
                }
                if max.is_some() {
                    advisories.insert(Advisory::MaxLengthOverride);
                }
            }
        }
    }

    if spec.length().is_set() {
        constraints.push(Constraint::Length(spec.length()));
    }

    if let Some(min) = spec.min_uppercase() {
        constraints.push(Constraint::MinUppercase(min));
    }

    if let Some(prefix) = spec.starts_with() {
        constraints.push(Constraint::Prefix(prefix.to_string(), spec.affix_case()));
    }

    if let Some(suffix) = spec.ends_with() {
        constraints.push(Constraint::Suffix(suffix.to_string(), spec.affix_case()));
    }

    if !spec.excluded().is_empty() {
        constraints.push(Constraint::Exclude(spec.excluded().iter().copied().collect()));
    }

    match spec.inclusion() {
        Inclusion::Unrestricted => {}
        Inclusion::AnyOf(chars) => constraints.push(Constraint::AnyOf(chars.iter().copied().collect())),
        Inclusion::AllOf(chars) => constraints.push(Constraint::AllOf(chars.iter().copied().collect())),
    }

    log::debug!(
        "Compiled policy with {} active constraint(s), {} advisory notice(s)",
        constraints.len(),
        advisories.len()
    );

    CompiledPolicy {
        constraints,
        advisories,
    }
}
