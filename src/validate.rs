use regex::Regex;

use crate::checksum::Algorithm;
use crate::config::{ValidateOptions, active_pattern};
use crate::pattern::{CompiledPattern, Token};

#[derive(Debug, Clone)]
enum Matcher {
    Pattern {
        pattern: CompiledPattern,
        regex: Option<Regex>,
    },
    Fixed,
}

/// Validator with its pattern and matcher compiled once.
///
/// Validation is total: every malformed or inconsistent input is `false`.
#[derive(Debug, Clone)]
pub struct IdValidator {
    options: ValidateOptions,
    matcher: Matcher,
}

impl IdValidator {
    pub fn new(options: ValidateOptions) -> Self {
        let matcher = match active_pattern(options.pattern.as_deref()) {
            Some(raw) => {
                let pattern = CompiledPattern::compile(raw);
                let regex = pattern
                    .matcher(options.charset)
                    .inspect_err(|err| tracing::warn!(%err, "pattern matcher failed to compile"))
                    .ok();
                Matcher::Pattern { pattern, regex }
            }
            None => Matcher::Fixed,
        };
        Self { options, matcher }
    }

    pub const fn options(&self) -> &ValidateOptions {
        &self.options
    }

    pub fn is_valid(&self, input: &str) -> bool {
        let charset = self.options.charset;
        let algorithm = self.options.algorithm;
        if !algorithm.supports(charset) {
            tracing::debug!(%algorithm, %charset, "rejected: algorithm does not fit charset");
            return false;
        }
        match &self.matcher {
            Matcher::Pattern { pattern, regex } => {
                self.check_pattern(pattern, regex.as_ref(), input)
            }
            Matcher::Fixed => self.check_fixed(input),
        }
    }

    fn check_pattern(
        &self,
        pattern: &CompiledPattern,
        regex: Option<&Regex>,
        input: &str,
    ) -> bool {
        let algorithm = self.options.algorithm;
        let checksum_slot = match (algorithm, pattern.checksum_slot()) {
            (Algorithm::None, _) => None,
            (_, Some(slot)) => Some(slot),
            (_, None) => {
                tracing::debug!(pattern = pattern.source(), "rejected: no slot for checksum");
                return false;
            }
        };

        if !regex.is_some_and(|r| r.is_match(input)) {
            tracing::debug!(pattern = pattern.source(), "rejected: pattern mismatch");
            return false;
        }
        let Some(slot) = checksum_slot else {
            return true;
        };

        let chars: Vec<char> = input.chars().collect();
        let mut body = String::new();
        let mut claimed = None;
        for (i, (token, c)) in pattern.tokens().iter().zip(&chars).enumerate() {
            if *token != Token::Slot {
                continue;
            }
            let c = c.to_ascii_uppercase();
            if i == slot {
                claimed = Some(c);
            } else {
                body.push(c);
            }
        }

        match algorithm.check_char(&body) {
            Ok(Some(expected)) if claimed == Some(expected) => true,
            Ok(_) => {
                tracing::debug!(algorithm = %algorithm, "rejected: checksum mismatch");
                false
            }
            Err(err) => {
                tracing::debug!(%err, "rejected: checksum body");
                false
            }
        }
    }

    fn check_fixed(&self, input: &str) -> bool {
        let options = &self.options;
        let expected = options.expected_length();
        if expected < 2 {
            tracing::debug!(expected, "rejected: length below 2");
            return false;
        }
        if let (Some(total_length), Some(_)) = (options.total_length, &options.separator) {
            if total_length != options.groups.saturating_mul(options.group_size) {
                tracing::debug!(total_length, "rejected: conflicting length options");
                return false;
            }
        }

        let normalized = options.charset.normalize(input);
        if normalized.len() != expected {
            tracing::debug!(
                expected,
                actual = normalized.len(),
                "rejected: length mismatch"
            );
            return false;
        }

        match options.algorithm {
            Algorithm::None => true,
            algorithm if !algorithm.accepts(&normalized) => {
                tracing::debug!(%algorithm, "rejected: characters outside checksum alphabet");
                false
            }
            algorithm => algorithm.validate(&normalized),
        }
    }
}

/// Returns true if `input` is a well-formed identifier for `options`.
pub fn validate_id(input: &str, options: &ValidateOptions) -> bool {
    IdValidator::new(options.clone()).is_valid(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::Charset;

    fn alnum_mod36(pattern: &str) -> ValidateOptions {
        ValidateOptions::new()
            .pattern(pattern)
            .charset(Charset::Alphanumeric)
            .algorithm(Algorithm::Mod36)
    }

    #[test]
    fn test_pattern_without_slot_and_checksum_is_invalid() {
        assert!(!validate_id("PROMO", &alnum_mod36("PROMO")));
    }

    #[test]
    fn test_pattern_without_slot_no_algorithm() {
        let options = ValidateOptions::new().pattern("PROMO");
        assert!(validate_id("PROMO", &options));
        assert!(!validate_id("PROMX", &options));
    }

    #[test]
    fn test_pattern_plain_match() {
        let options = ValidateOptions::new().pattern("ID-###");
        assert!(validate_id("ID-123", &options));
        assert!(!validate_id("ID-12", &options));
        assert!(!validate_id("ID-12A", &options));
        assert!(!validate_id("IDX123", &options));
        assert!(!validate_id(" ID-123", &options));
    }

    #[test]
    fn test_pattern_mod36_checksum() {
        // body "I0" sums to 18 -> check index 18 -> 'I'
        let options = alnum_mod36("A1-##-#");
        assert!(validate_id("A1-I0-I", &options));
        assert!(!validate_id("A1-I0-J", &options));
        // literal flipped
        assert!(!validate_id("A2-I0-I", &options));
    }

    #[test]
    fn test_pattern_mod36_case_insensitive() {
        let options = alnum_mod36("A1-##-#");
        assert!(validate_id("A1-i0-i", &options));
        // literals remain case-sensitive
        assert!(!validate_id("a1-I0-I", &options));
    }

    #[test]
    fn test_pattern_luhn_checksum() {
        let options = ValidateOptions::new()
            .pattern("CARD ###########")
            .algorithm(Algorithm::Luhn);
        assert!(validate_id("CARD 79927398713", &options));
        assert!(!validate_id("CARD 79927398714", &options));
    }

    #[test]
    fn test_pattern_luhn_with_alphanumeric_is_invalid() {
        let options = ValidateOptions::new()
            .pattern("##")
            .charset(Charset::Alphanumeric)
            .algorithm(Algorithm::Luhn);
        assert!(!validate_id("A0", &options));
    }

    #[test]
    fn test_pattern_metacharacters_are_literals() {
        let options = ValidateOptions::new().pattern("(#.#)");
        assert!(validate_id("(1.2)", &options));
        assert!(!validate_id("(1x2)", &options));
    }

    #[test]
    fn test_fixed_no_algorithm() {
        let options = ValidateOptions::new();
        assert!(validate_id("1234567812345678", &options));
        assert!(validate_id("1234-5678-1234-5678", &options));
        assert!(!validate_id("123456781234567", &options));
        assert!(!validate_id("", &options));
    }

    #[test]
    fn test_fixed_luhn() {
        let options = ValidateOptions::new()
            .total_length(11)
            .algorithm(Algorithm::Luhn);
        assert!(validate_id("79927398713", &options));
        assert!(validate_id("7992 7398 713", &options));
        assert!(!validate_id("79927398710", &options));
        assert!(!validate_id("7992739871", &options));
    }

    #[test]
    fn test_fixed_mod36_uppercases_input() {
        let options = ValidateOptions::new()
            .total_length(4)
            .charset(Charset::Alphanumeric)
            .algorithm(Algorithm::Mod36);
        assert!(validate_id("123U", &options));
        assert!(validate_id("12-3u", &options));
        assert!(!validate_id("123V", &options));
    }

    #[test]
    fn test_fixed_luhn_on_alphanumeric_rejects_letters() {
        let options = ValidateOptions::new()
            .total_length(3)
            .charset(Charset::Alphanumeric)
            .algorithm(Algorithm::Luhn);
        assert!(!validate_id("A00", &options));
    }

    #[test]
    fn test_fixed_conflicting_lengths_reject() {
        let options = ValidateOptions::new().total_length(10).separator("-");
        assert!(!validate_id("1234567890", &options));
    }

    #[test]
    fn test_mod36_on_numeric_rejected_in_pattern_mode() {
        let options = ValidateOptions::new()
            .pattern("##")
            .algorithm(Algorithm::Mod36);
        // "00" carries a correct mod36 check, but the pairing itself is invalid
        assert!(!validate_id("00", &options));
    }

    #[test]
    fn test_mod36_on_numeric_rejected_in_fixed_mode() {
        let options = ValidateOptions::new()
            .total_length(2)
            .algorithm(Algorithm::Mod36);
        assert!(!validate_id("00", &options));
    }

    #[test]
    fn test_luhn_on_alphanumeric_rejected_even_for_digits() {
        let options = ValidateOptions::new()
            .total_length(11)
            .charset(Charset::Alphanumeric)
            .algorithm(Algorithm::Luhn);
        assert!(!validate_id("79927398713", &options));
    }

    #[test]
    fn test_fixed_length_below_two_rejected() {
        assert!(!validate_id("", &ValidateOptions::new().total_length(0)));
        assert!(!validate_id("7", &ValidateOptions::new().total_length(1)));
        assert!(!validate_id("", &ValidateOptions::new().groups(0)));
        assert!(validate_id("71", &ValidateOptions::new().total_length(2)));
    }

    #[test]
    fn test_validator_reuse() {
        let validator = IdValidator::new(alnum_mod36("A1-##-#"));
        assert!(validator.is_valid("A1-I0-I"));
        assert!(!validator.is_valid("garbage"));
        assert_eq!(validator.options().algorithm, Algorithm::Mod36);
    }

    #[test]
    fn test_never_panics_on_odd_input() {
        let options = alnum_mod36("##-#");
        for input in ["", "-", "é-é", "\u{0}\u{0}-\u{0}", "ÀB-C"] {
            assert!(!validate_id(input, &options));
        }
    }
}
