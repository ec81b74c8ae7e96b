//! Format rules shared by the checkout and member forms.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").expect("email pattern compiles")
});

static MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^09[0-9]{8}$").expect("mobile pattern compiles"));

/// Check an email address against the storefront's accepted format.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

/// Check a Taiwanese mobile number: ten digits starting with `09`.
pub fn is_valid_mobile(phone: &str) -> bool {
    MOBILE.is_match(phone.trim())
}

/// Check that a required text field has content.
pub fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("ada@test.com"));
        assert!(is_valid_email("ada.lovelace@mail.example.tw"));
        assert!(!is_valid_email("ada@test"));
        assert!(!is_valid_email("ada@test.comma"));
        assert!(!is_valid_email("@test.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_mobile_format() {
        assert!(is_valid_mobile("0912345678"));
        assert!(!is_valid_mobile("091234567"));
        assert!(!is_valid_mobile("0812345678"));
        assert!(!is_valid_mobile("09-1234-5678"));
    }

    #[test]
    fn test_is_filled() {
        assert!(is_filled("x"));
        assert!(!is_filled("   "));
    }
}
