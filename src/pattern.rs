//! Pattern compiler.
//!
//! Parses templates like `"PROMO-###-###"` where `#` is a generated character
//! and everything else is a literal. When a checksum algorithm is active, the
//! last `#` holds the check character.

use regex::Regex;

use crate::charset::Charset;

/// The character that marks a generated slot.
pub const SLOT: char = '#';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Matched verbatim.
    Literal(char),
    /// One charset character.
    Slot,
}

/// A compiled pattern: one token per character of the trimmed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    source: String,
    tokens: Vec<Token>,
    checksum_slot: Option<usize>,
}

impl CompiledPattern {
    /// Compiles `raw` after trimming surrounding whitespace.
    pub fn compile(raw: &str) -> Self {
        let source = raw.trim().to_string();
        let tokens: Vec<Token> = source
            .chars()
            .map(|c| if c == SLOT { Token::Slot } else { Token::Literal(c) })
            .collect();
        let checksum_slot = tokens.iter().rposition(|t| *t == Token::Slot);
        Self {
            source,
            tokens,
            checksum_slot,
        }
    }

    /// The trimmed template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Length in characters, literals included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Index of the last slot, if the pattern has any.
    pub const fn checksum_slot(&self) -> Option<usize> {
        self.checksum_slot
    }

    pub fn slot_count(&self) -> usize {
        self.tokens.iter().filter(|t| **t == Token::Slot).count()
    }

    /// Builds an anchored matcher: literals escaped, one character class per slot.
    ///
    /// Alphanumeric slots accept lowercase letters as well.
    ///
    /// # Errors
    ///
    /// Fails only if the expression exceeds the regex size limit.
    pub fn matcher(&self, charset: Charset) -> Result<Regex, regex::Error> {
        let class = match charset {
            Charset::Numeric => "[0-9]",
            Charset::Alphanumeric => "[0-9A-Za-z]",
        };
        let mut expr = String::with_capacity(self.source.len() * 2 + 2);
        expr.push('^');
        let mut buf = [0u8; 4];
        for token in &self.tokens {
            match token {
                Token::Slot => expr.push_str(class),
                Token::Literal(c) => expr.push_str(&regex::escape(c.encode_utf8(&mut buf))),
            }
        }
        expr.push('$');
        Regex::new(&expr)
    }
}
