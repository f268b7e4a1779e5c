//! Policy specification
//!
//! [`PolicyOptions`] is the raw, unvalidated set of options as they come from
//! the command line. [`PolicySpec`] is the validated, immutable form the
//! filtering core works with.

use crate::error::{ConflictError, LengthOption};
use std::collections::BTreeSet;

/// Raw policy options, every field independently optional
#[derive(Debug, Clone, Default)]
pub struct PolicyOptions {
    pub default_policy: bool,
    pub names: Vec<String>,
    pub length: Option<usize>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min_uppercase: Option<usize>,
    pub starts_with: Option<String>,
    pub ends_with: Option<String>,
    pub case_sensitive: bool,
    pub exclude: Vec<char>,
    pub include: Vec<char>,
    pub include_exclusive: Vec<char>,
}

/// Entry length constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthBound {
    #[default]
    Any,
    Exact(usize),
    Range {
        min: Option<usize>,
        max: Option<usize>,
    },
}

impl LengthBound {
    #[inline]
    pub fn admits(&self, length: usize) -> bool {
        match *self {
            Self::Any => true,
            Self::Exact(n) => length == n,
            Self::Range { min, max } => {
                min.map_or(true, |min| length >= min) && max.map_or(true, |max| length <= max)
            }
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Any)
    }

    /// Upper limit on entry length, if any
    pub fn ceiling(&self) -> Option<(LengthOption, usize)> {
        match *self {
            Self::Exact(n) => Some((LengthOption::Exact, n)),
            Self::Range { max: Some(max), .. } => Some((LengthOption::Max, max)),
            _ => None,
        }
    }
}

/// Required characters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Inclusion {
    #[default]
    Unrestricted,
    /// At least one of these must appear
    AnyOf(BTreeSet<char>),
    /// Every one of these must appear
    AllOf(BTreeSet<char>),
}

/// How prefixes and suffixes are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    #[default]
    Insensitive,
    Sensitive,
}

/// Validated, immutable policy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicySpec {
    /// Excluded names when the default complexity rule is active
    default_policy: Option<Vec<String>>,
    length: LengthBound,
    min_uppercase: Option<usize>,
    starts_with: Option<String>,
    ends_with: Option<String>,
    affix_case: CaseSensitivity,
    excluded: BTreeSet<char>,
    inclusion: Inclusion,
}

impl PolicySpec {
    /// Excluded names, present only when the default policy is enabled
    pub fn default_policy(&self) -> Option<&[String]> {
        self.default_policy.as_deref()
    }

    pub fn length(&self) -> LengthBound {
        self.length
    }

    pub fn min_uppercase(&self) -> Option<usize> {
        self.min_uppercase
    }

    pub fn starts_with(&self) -> Option<&str> {
        self.starts_with.as_deref()
    }

    pub fn ends_with(&self) -> Option<&str> {
        self.ends_with.as_deref()
    }

    pub fn affix_case(&self) -> CaseSensitivity {
        self.affix_case
    }

    pub fn excluded(&self) -> &BTreeSet<char> {
        &self.excluded
    }

    pub fn inclusion(&self) -> &Inclusion {
        &self.inclusion
    }
}

impl TryFrom<PolicyOptions> for PolicySpec {
    type Error = ConflictError;

    fn try_from(options: PolicyOptions) -> Result<Self, Self::Error> {
        let length = match (options.length, options.min_length, options.max_length) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                return Err(ConflictError::ExactWithBounds)
            }
            (Some(n), None, None) => LengthBound::Exact(n),
            (None, Some(min), Some(max)) if min > max => {
                return Err(ConflictError::InvertedBounds { min, max })
            }
            (None, None, None) => LengthBound::Any,
            (None, min, max) => LengthBound::Range { min, max },
        };

        if let (Some(uppercase), Some((bound, limit))) = (options.min_uppercase, length.ceiling()) {
            if uppercase > limit {
                return Err(ConflictError::UppercaseExceedsLength {
                    uppercase,
                    bound,
                    length: limit,
                });
            }
        }

        let starts_with = options.starts_with.filter(|s| !s.is_empty());
        let ends_with = options.ends_with.filter(|s| !s.is_empty());

        if let Some((bound, limit)) = length.ceiling() {
            for (option, affix) in [("starts-with", &starts_with), ("ends-with", &ends_with)] {
                if affix.as_ref().is_some_and(|a| a.chars().count() > limit) {
                    return Err(ConflictError::AffixExceedsLength {
                        option,
                        bound,
                        length: limit,
                    });
                }
            }
        }

        let excluded: BTreeSet<char> = options.exclude.into_iter().collect();
        let include: BTreeSet<char> = options.include.into_iter().collect();
        let include_exclusive: BTreeSet<char> = options.include_exclusive.into_iter().collect();

        if !include.is_empty() && !include_exclusive.is_empty() {
            return Err(ConflictError::IncludeWithIncludeExclusive);
        }

        let required = [
            ("include", include.iter().copied().collect::<Vec<_>>()),
            ("include-exclusive", include_exclusive.iter().copied().collect()),
            ("starts-with", starts_with.iter().flat_map(|s| s.chars()).collect()),
            ("ends-with", ends_with.iter().flat_map(|s| s.chars()).collect()),
        ];
        for (option, chars) in required {
            if let Some(&ch) = chars.iter().find(|c| excluded.contains(*c)) {
                return Err(ConflictError::ExcludedCharRequired { ch, option });
            }
        }

        // include-exclusive wins when both are present
        let inclusion = if !include_exclusive.is_empty() {
            Inclusion::AllOf(include_exclusive)
        } else if !include.is_empty() {
            Inclusion::AnyOf(include)
        } else {
            Inclusion::Unrestricted
        };

        let default_policy = options.default_policy.then(|| split_names(&options.names));

        Ok(Self {
            default_policy,
            length,
            min_uppercase: options.min_uppercase,
            starts_with,
            ends_with,
            affix_case: if options.case_sensitive {
                CaseSensitivity::Sensitive
            } else {
                CaseSensitivity::Insensitive
            },
            excluded,
            inclusion,
        })
    }
}

/// Split name arguments on commas and spaces, dropping empty pieces
fn split_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .flat_map(|n| n.split(|c: char| c == ',' || c == ' '))
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}
