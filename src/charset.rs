use std::fmt;
use std::str::FromStr;

use crate::error::IdError;
use crate::rng::RandomSource;

pub(crate) const DIGITS: &[u8] = b"0123456789";
pub(crate) const NONZERO_DIGITS: &[u8] = b"123456789";
pub(crate) const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The alphabet an identifier is drawn from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Charset {
    /// `0-9`
    #[default]
    Numeric,
    /// `0-9A-Z`; input is upper-cased before membership tests.
    Alphanumeric,
}

impl Charset {
    /// Ordered alphabet used for both membership and random selection.
    pub const fn alphabet(self) -> &'static [u8] {
        match self {
            Self::Numeric => DIGITS,
            Self::Alphanumeric => BASE36,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Alphanumeric => "alphanumeric",
        }
    }

    /// Returns true if `c` belongs to the alphabet, without case folding.
    pub fn contains(self, c: char) -> bool {
        match self {
            Self::Numeric => c.is_ascii_digit(),
            Self::Alphanumeric => c.is_ascii_digit() || c.is_ascii_uppercase(),
        }
    }

    /// Case-folds (alphanumeric only) and drops every non-member character,
    /// keeping the relative order of the rest.
    pub fn normalize(self, input: &str) -> String {
        match self {
            Self::Numeric => input.chars().filter(char::is_ascii_digit).collect(),
            Self::Alphanumeric => input
                .chars()
                .map(|c| c.to_ascii_uppercase())
                .filter(|&c| self.contains(c))
                .collect(),
        }
    }

    /// Draws one character of this charset, consuming exactly one value from `rng`.
    pub fn random_char<R: RandomSource + ?Sized>(self, rng: &mut R) -> char {
        pick(self.alphabet(), rng)
    }
}

/// Maps one draw in [0,1) to `alphabet[floor(draw * len)]`.
///
/// Out-of-range draws are clamped to the nearest end of the alphabet.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "index is clamped to the alphabet bounds"
)]
pub(crate) fn pick<R: RandomSource + ?Sized>(alphabet: &[u8], rng: &mut R) -> char {
    let draw = rng.next_unit();
    let last = alphabet.len().saturating_sub(1);
    if !(0.0..1.0).contains(&draw) {
        tracing::warn!(draw, "random source returned a value outside [0, 1)");
    }
    let index = if draw.is_nan() || draw <= 0.0 {
        0
    } else {
        ((draw * alphabet.len() as f64).floor() as usize).min(last)
    };
    alphabet.get(index).map_or('0', |&b| char::from(b))
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" => Ok(Self::Numeric),
            "alphanumeric" => Ok(Self::Alphanumeric),
            _ => Err(IdError::UnknownCharset(s.to_string())),
        }
    }
}
