pub mod charset;
pub mod checksum;
pub mod config;
pub mod error;
pub mod format;
pub mod generate;
pub mod pattern;
pub mod rng;
pub mod validate;

pub use charset::Charset;
pub use checksum::{
    Algorithm, luhn_checksum_digit, luhn_validate, mod36_check_char, mod36_validate,
};
pub use config::{FormatOptions, GenerateOptions, ValidateOptions};
pub use error::{IdError, Result};
pub use format::{format_id, normalize_id, normalize_id_for_charset};
pub use generate::{IdGenerator, generate_id, generate_id_with};
pub use pattern::{CompiledPattern, Token};
pub use rng::{RandomSource, SeededRng, ThreadSource};
pub use validate::{IdValidator, validate_id};
