//! CEP format validation

use regex::Regex;
use std::sync::LazyLock;

/// Five digits, any run of hyphens, three digits. Searched, not anchored.
const CEP_PATTERN: &str = r"[0-9]{5}-*[0-9]{3}";

static CEP_REGEX: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(CEP_PATTERN));

/// Check whether `cep` contains a postal code shaped substring.
///
/// A string that only *contains* a match (`"abc12345678"`) is accepted. An
/// error means the pattern engine itself failed, not that the input is bad.
pub fn verify_valid_cep(cep: &str) -> Result<bool, regex::Error> {
    let regex = CEP_REGEX.as_ref().map_err(Clone::clone)?;
    Ok(regex.is_match(cep))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("12345678", true)]
    #[case("12345-678", true)]
    #[case("01001000", true)]
    #[case("12345--678", true)]
    #[case("abc12345678xyz", true)]
    #[case("123456789", true)]
    #[case("123456", false)]
    #[case("000", false)]
    #[case("", false)]
    #[case("1234-5678", false)]
    #[case("abcde-fgh", false)]
    fn test_verify_valid_cep(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(verify_valid_cep(input).unwrap(), expected);
    }

    #[test]
    fn test_non_ascii_digits_are_rejected() {
        // Arabic-Indic digits
        assert!(!verify_valid_cep("١٢٣٤٥٦٧٨").unwrap());
    }
}
