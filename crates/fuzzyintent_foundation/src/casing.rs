//! Word casing policy.
//!
//! The same policy is applied to grammar literals during training and to
//! query words during recognition so the two sides compare like with like.

use std::fmt;
use std::str::FromStr;

/// Case transformation applied to words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WordCasing {
    /// Leave words as authored.
    #[default]
    Ignore,
    /// Lower-case every word.
    Lower,
    /// Upper-case every word.
    Upper,
}

impl WordCasing {
    /// Applies the casing policy to a word.
    #[must_use]
    pub fn apply(self, word: &str) -> String {
        match self {
            Self::Ignore => word.to_string(),
            Self::Lower => word.to_lowercase(),
            Self::Upper => word.to_uppercase(),
        }
    }

    /// Returns true if this policy leaves words untouched.
    #[must_use]
    pub const fn is_identity(self) -> bool {
        matches!(self, Self::Ignore)
    }
}

impl fmt::Display for WordCasing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ignore => "ignore",
            Self::Lower => "lower",
            Self::Upper => "upper",
        })
    }
}

impl FromStr for WordCasing {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(Self::Ignore),
            "lower" => Ok(Self::Lower),
            "upper" => Ok(Self::Upper),
            other => Err(format!("unknown word casing: {other}")),
        }
    }
}
