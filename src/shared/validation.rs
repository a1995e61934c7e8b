use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating Indian postal codes (PIN codes)
    /// Six digits, no leading zero
    /// - Valid: "509001", "500032"
    /// - Invalid: "050001", "50900", "5090011", "50900a"
    pub static ref PINCODE_REGEX: Regex = Regex::new(r"^[1-9][0-9]{5}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pincode_regex_valid() {
        assert!(PINCODE_REGEX.is_match("509001"));
        assert!(PINCODE_REGEX.is_match("500032"));
        assert!(PINCODE_REGEX.is_match("110001"));
    }

    #[test]
    fn test_pincode_regex_invalid() {
        assert!(!PINCODE_REGEX.is_match("050001")); // leading zero
        assert!(!PINCODE_REGEX.is_match("50900")); // too short
        assert!(!PINCODE_REGEX.is_match("5090011")); // too long
        assert!(!PINCODE_REGEX.is_match("50900a")); // non-digit
        assert!(!PINCODE_REGEX.is_match("")); // empty
    }
}
