//! Check-character algorithms.
//!
//! - [`Algorithm::Luhn`]: mod-10 double-and-reduce over decimal digits.
//! - [`Algorithm::Mod36`]: weighted-sum over `0-9A-Z`, each symbol weighted by its index.
//!
//! Both are pure. An empty body sums to zero and yields `'0'`.

use std::fmt;
use std::str::FromStr;

use crate::charset::{BASE36, Charset};
use crate::error::{IdError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    #[default]
    None,
    Luhn,
    Mod36,
}

impl Algorithm {
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Luhn => "luhn",
            Self::Mod36 => "mod36",
        }
    }

    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Luhn pairs only with numeric, mod36 only with alphanumeric.
    pub const fn supports(self, charset: Charset) -> bool {
        match self {
            Self::None => true,
            Self::Luhn => matches!(charset, Charset::Numeric),
            Self::Mod36 => matches!(charset, Charset::Alphanumeric),
        }
    }

    /// Returns true if every character of `s` is acceptable input for this algorithm.
    pub fn accepts(self, s: &str) -> bool {
        match self {
            Self::None => true,
            Self::Luhn => s.chars().all(|c| c.is_ascii_digit()),
            Self::Mod36 => s.chars().all(|c| mod36_value(c).is_some()),
        }
    }

    /// Computes the check character for `body`.
    ///
    /// Returns `None` for [`Algorithm::None`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidCharacter` if `body` contains a character outside the
    /// algorithm's alphabet.
    pub fn check_char(self, body: &str) -> Result<Option<char>> {
        match self {
            Self::None => Ok(None),
            Self::Luhn => luhn_checksum_digit(body).map(|d| Some(digit_char(d))),
            Self::Mod36 => mod36_check_char(body).map(Some),
        }
    }

    /// Validates a full string whose last character is the check character.
    ///
    /// Always false for [`Algorithm::None`], which has no check character.
    pub fn validate(self, full: &str) -> bool {
        match self {
            Self::None => false,
            Self::Luhn => luhn_validate(full),
            Self::Mod36 => mod36_validate(full),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = IdError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "luhn" => Ok(Self::Luhn),
            "mod36" => Ok(Self::Mod36),
            _ => Err(IdError::UnknownAlgorithm(s.to_string())),
        }
    }
}

fn digit_char(d: u32) -> char {
    char::from_digit(d, 10).unwrap_or('0')
}

/// Luhn check digit for a string of decimal digits.
///
/// Walking right to left, every other digit starting with the rightmost body
/// digit is doubled (9 subtracted when the result exceeds 9). These are the
/// odd positions once the check digit is appended.
///
/// # Errors
///
/// Returns `InvalidCharacter` on the first non-digit.
pub fn luhn_checksum_digit(body: &str) -> Result<u32> {
    let mut sum = 0u32;
    for (i, c) in body.chars().rev().enumerate() {
        let mut d = c.to_digit(10).ok_or(IdError::InvalidCharacter {
            algorithm: Algorithm::Luhn,
            character: c,
        })?;
        if i % 2 == 0 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum = (sum + d) % 10;
    }
    Ok((10 - sum) % 10)
}

/// Returns true if `full` is at least two digits and its last digit is the
/// Luhn check digit of the rest.
pub fn luhn_validate(full: &str) -> bool {
    if full.chars().count() < 2 || !full.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let (body, check) = full.split_at(full.len() - 1);
    luhn_checksum_digit(body)
        .is_ok_and(|expected| check.chars().next() == Some(digit_char(expected)))
}

fn mod36_value(c: char) -> Option<u32> {
    let b = u8::try_from(c).ok()?;
    BASE36
        .iter()
        .position(|&x| x == b)
        .and_then(|i| u32::try_from(i).ok())
}

/// Mod36 check character: index `(36 - sum % 36) % 36` where `sum` adds the
/// alphabet index of every body character.
///
/// # Errors
///
/// Returns `InvalidCharacter` if a character is outside `0-9A-Z`.
pub fn mod36_check_char(body: &str) -> Result<char> {
    let mut sum = 0u32;
    for c in body.chars() {
        let v = mod36_value(c).ok_or(IdError::InvalidCharacter {
            algorithm: Algorithm::Mod36,
            character: c,
        })?;
        sum = (sum + v) % 36;
    }
    let index = ((36 - sum) % 36) as usize;
    Ok(char::from(BASE36[index]))
}

/// Returns true if `full` is at least two `0-9A-Z` characters and its last
/// character is the mod36 check character of the rest.
pub fn mod36_validate(full: &str) -> bool {
    if full.chars().count() < 2 || !full.chars().all(|c| mod36_value(c).is_some()) {
        return false;
    }
    let (body, check) = full.split_at(full.len() - 1);
    mod36_check_char(body).is_ok_and(|expected| check.chars().next() == Some(expected))
}
