use crate::charset::Charset;
use crate::checksum::Algorithm;

pub const DEFAULT_GROUPS: usize = 4;
pub const DEFAULT_GROUP_SIZE: usize = 4;
pub const DEFAULT_SEPARATOR: &str = "-";

/// Options for generating an identifier.
///
/// A non-empty `pattern` takes precedence over `groups`, `group_size`,
/// `total_length` and `separator`, which are then ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub total_length: Option<usize>,
    pub groups: usize,
    pub group_size: usize,
    pub separator: Option<String>,
    pub charset: Charset,
    pub algorithm: Algorithm,
    pub pattern: Option<String>,
    /// Draw from a cryptographically strong source when no explicit one is given.
    pub use_crypto: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            total_length: None,
            groups: DEFAULT_GROUPS,
            group_size: DEFAULT_GROUP_SIZE,
            separator: None,
            charset: Charset::Numeric,
            algorithm: Algorithm::None,
            pattern: None,
            use_crypto: false,
        }
    }
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_length(mut self, len: usize) -> Self {
        self.total_length = Some(len);
        self
    }

    pub fn groups(mut self, groups: usize) -> Self {
        self.groups = groups;
        self
    }

    pub fn group_size(mut self, size: usize) -> Self {
        self.group_size = size;
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn use_crypto(mut self, yes: bool) -> Self {
        self.use_crypto = yes;
        self
    }

    /// Validation options describing the same shape.
    pub fn validation_options(&self) -> ValidateOptions {
        ValidateOptions {
            total_length: self.total_length,
            groups: self.groups,
            group_size: self.group_size,
            separator: self.separator.clone(),
            charset: self.charset,
            algorithm: self.algorithm,
            pattern: self.pattern.clone(),
        }
    }

    /// `total_length` if set, else `groups * group_size`.
    pub fn expected_length(&self) -> usize {
        expected_length(self.total_length, self.groups, self.group_size)
    }
}

/// Options for validating an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateOptions {
    pub total_length: Option<usize>,
    pub groups: usize,
    pub group_size: usize,
    pub separator: Option<String>,
    pub charset: Charset,
    pub algorithm: Algorithm,
    pub pattern: Option<String>,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        GenerateOptions::default().validation_options()
    }
}

impl ValidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_length(mut self, len: usize) -> Self {
        self.total_length = Some(len);
        self
    }

    pub fn groups(mut self, groups: usize) -> Self {
        self.groups = groups;
        self
    }

    pub fn group_size(mut self, size: usize) -> Self {
        self.group_size = size;
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn expected_length(&self) -> usize {
        expected_length(self.total_length, self.groups, self.group_size)
    }
}

impl From<&GenerateOptions> for ValidateOptions {
    fn from(options: &GenerateOptions) -> Self {
        options.validation_options()
    }
}

/// Options for grouping an identifier for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub groups: usize,
    pub group_size: usize,
    pub separator: String,
    pub charset: Charset,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            groups: DEFAULT_GROUPS,
            group_size: DEFAULT_GROUP_SIZE,
            separator: DEFAULT_SEPARATOR.to_string(),
            charset: Charset::Numeric,
        }
    }
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(mut self, groups: usize) -> Self {
        self.groups = groups;
        self
    }

    pub fn group_size(mut self, size: usize) -> Self {
        self.group_size = size;
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }
}

/// Returns the trimmed pattern if it is present and non-empty.
pub(crate) fn active_pattern(pattern: Option<&str>) -> Option<&str> {
    pattern.map(str::trim).filter(|p| !p.is_empty())
}

fn expected_length(total_length: Option<usize>, groups: usize, group_size: usize) -> usize {
    total_length.unwrap_or_else(|| groups.saturating_mul(group_size))
}
