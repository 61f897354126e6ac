use crate::charset::{Charset, NONZERO_DIGITS, pick};
use crate::config::{FormatOptions, GenerateOptions, active_pattern};
use crate::error::{IdError, Result};
use crate::format::format_id;
use crate::pattern::{CompiledPattern, Token};
use crate::rng::{RandomSource, ThreadSource};

/// Upper bound on the up-front buffer reservation for fixed-length ids.
const MAX_PREALLOC: usize = 256;

#[derive(Debug, Clone)]
enum Shape {
    Pattern(CompiledPattern),
    Fixed { body_length: usize },
}

/// Identifier generator with its configuration checked and its pattern compiled.
///
/// Build once and call [`IdGenerator::generate`] repeatedly; every call is
/// independent apart from the random draws it consumes.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    options: GenerateOptions,
    shape: Shape,
}

impl IdGenerator {
    /// Checks `options` and compiles the pattern, if any.
    ///
    /// # Errors
    ///
    /// - `MissingChecksumSlot` if a checksum is requested on a pattern without `#`.
    /// - `LengthTooShort` if the fixed length is below 2.
    /// - `LengthConflict` if `total_length` and a separator are both set and
    ///   `total_length != groups * group_size`.
    /// - `IncompatibleAlgorithm` if the algorithm does not fit the charset.
    pub fn new(options: GenerateOptions) -> Result<Self> {
        let shape = match active_pattern(options.pattern.as_deref()) {
            Some(raw) => {
                let pattern = CompiledPattern::compile(raw);
                if !options.algorithm.is_none() && pattern.checksum_slot().is_none() {
                    return Err(IdError::MissingChecksumSlot {
                        pattern: pattern.source().to_string(),
                    });
                }
                check_algorithm(&options)?;
                Shape::Pattern(pattern)
            }
            None => {
                let total = options.expected_length();
                if total < 2 {
                    return Err(IdError::LengthTooShort { length: total });
                }
                if let (Some(total_length), Some(_)) = (options.total_length, &options.separator) {
                    let grouped = options.groups.saturating_mul(options.group_size);
                    if total_length != grouped {
                        return Err(IdError::LengthConflict {
                            total_length,
                            groups: options.groups,
                            group_size: options.group_size,
                        });
                    }
                }
                check_algorithm(&options)?;
                let body_length = if options.algorithm.is_none() {
                    total
                } else {
                    total - 1
                };
                Shape::Fixed { body_length }
            }
        };

        Ok(Self { options, shape })
    }

    pub const fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Returns the compiled pattern when generating in pattern mode.
    pub const fn pattern(&self) -> Option<&CompiledPattern> {
        match &self.shape {
            Shape::Pattern(pattern) => Some(pattern),
            Shape::Fixed { .. } => None,
        }
    }

    /// Generates an identifier from a fresh OS-seeded source, cryptographically
    /// strong when `use_crypto` is set.
    ///
    /// # Errors
    ///
    /// See [`IdGenerator::generate_with`].
    pub fn generate(&self) -> Result<String> {
        if self.options.use_crypto {
            self.generate_with(&mut ThreadSource::crypto())
        } else {
            self.generate_with(&mut ThreadSource::fast())
        }
    }

    /// Generates an identifier, drawing exactly one value from `rng` per
    /// generated body character, left to right.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCharacter` if a checksum routine receives a character
    /// outside its alphabet.
    pub fn generate_with<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<String> {
        let id = match &self.shape {
            Shape::Pattern(pattern) => self.fill_pattern(pattern, rng)?,
            Shape::Fixed { body_length } => self.fill_fixed(*body_length, rng)?,
        };
        let mode = if self.pattern().is_some() { "pattern" } else { "fixed" };
        tracing::debug!(
            mode,
            charset = %self.options.charset,
            algorithm = %self.options.algorithm,
            length = id.chars().count(),
            "generated identifier"
        );
        Ok(id)
    }

    fn fill_pattern<R: RandomSource + ?Sized>(
        &self,
        pattern: &CompiledPattern,
        rng: &mut R,
    ) -> Result<String> {
        let charset = self.options.charset;
        let algorithm = self.options.algorithm;
        let checksum_slot = if algorithm.is_none() {
            None
        } else {
            pattern.checksum_slot()
        };

        let mut out: Vec<char> = Vec::with_capacity(pattern.len());
        let mut body = String::new();
        for (i, token) in pattern.tokens().iter().enumerate() {
            match token {
                Token::Literal(c) => out.push(*c),
                Token::Slot if Some(i) == checksum_slot => out.push('0'),
                Token::Slot => {
                    let c = charset.random_char(rng);
                    body.push(c);
                    out.push(c);
                }
            }
        }

        if let (Some(slot), Some(check)) = (checksum_slot, algorithm.check_char(&body)?) {
            if let Some(place) = out.get_mut(slot) {
                *place = check;
            }
        }

        Ok(out.into_iter().collect())
    }

    fn fill_fixed<R: RandomSource + ?Sized>(
        &self,
        body_length: usize,
        rng: &mut R,
    ) -> Result<String> {
        let charset = self.options.charset;
        let mut id = String::with_capacity(reserve_for(body_length));
        for i in 0..body_length {
            let c = if i == 0 && charset == Charset::Numeric {
                pick(NONZERO_DIGITS, rng)
            } else {
                charset.random_char(rng)
            };
            id.push(c);
        }

        if let Some(check) = self.options.algorithm.check_char(&id)? {
            id.push(check);
        }

        match &self.options.separator {
            Some(separator) => format_id(
                &id,
                &FormatOptions {
                    groups: self.options.groups,
                    group_size: self.options.group_size,
                    separator: separator.clone(),
                    charset,
                },
            ),
            None => Ok(id),
        }
    }
}

/// Buffer size for a body plus its check character, capped at [`MAX_PREALLOC`].
fn reserve_for(body_length: usize) -> usize {
    body_length.saturating_add(1).min(MAX_PREALLOC)
}

fn check_algorithm(options: &GenerateOptions) -> Result<()> {
    if options.algorithm.supports(options.charset) {
        Ok(())
    } else {
        Err(IdError::IncompatibleAlgorithm {
            algorithm: options.algorithm,
            charset: options.charset,
        })
    }
}

/// Generates one identifier.
///
/// # Errors
///
/// See [`IdGenerator::new`] and [`IdGenerator::generate_with`].
pub fn generate_id(options: &GenerateOptions) -> Result<String> {
    IdGenerator::new(options.clone())?.generate()
}

/// Generates one identifier from the given random source.
///
/// # Errors
///
/// See [`IdGenerator::new`] and [`IdGenerator::generate_with`].
pub fn generate_id_with<R: RandomSource + ?Sized>(
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<String> {
    IdGenerator::new(options.clone())?.generate_with(rng)
}
