use crate::charset::Charset;
use crate::checksum::Algorithm;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("length must be at least 2, got {length}")]
    LengthTooShort { length: usize },

    #[error("total length {total_length} does not match {groups} groups of {group_size}")]
    LengthConflict {
        total_length: usize,
        groups: usize,
        group_size: usize,
    },

    #[error("algorithm '{algorithm}' cannot be used with the {charset} charset")]
    IncompatibleAlgorithm {
        algorithm: Algorithm,
        charset: Charset,
    },

    #[error("pattern '{pattern}' has no '#' slot to hold a checksum")]
    MissingChecksumSlot { pattern: String },

    #[error("invalid character {character:?} for {algorithm} checksum")]
    InvalidCharacter {
        algorithm: Algorithm,
        character: char,
    },

    #[error("expected {expected} characters to format, found {actual}")]
    FormatLengthMismatch { expected: usize, actual: usize },

    #[error("unknown charset: {0}")]
    UnknownCharset(String),

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, IdError>;
