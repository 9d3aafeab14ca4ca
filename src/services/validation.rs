//! Registration and login form checks.

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;

use serde::Serialize;

const MIN_STRONG_LEN: usize = 8;
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=13;

/// One `@`, no whitespace, and a `.` in the domain with text on both sides.
/// Any such dot qualifies, so `user@example.com.` passes.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// 10 to 13 digits once separators are stripped.
#[must_use]
pub fn validate_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    PHONE_DIGITS.contains(&digits)
}

/// Strength meter shown under the password field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    /// 1 (weak) to 4 (strong).
    pub score: u8,
    pub text: &'static str,
    pub class: &'static str,
}

#[must_use]
pub fn check_password_strength(password: &str) -> PasswordStrength {
    let checks = [
        password.chars().count() >= MIN_STRONG_LEN,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let passed = checks.iter().filter(|ok| **ok).count();

    match passed {
        0 | 1 => PasswordStrength { score: 1, text: "Lemah", class: "strength-weak" },
        2 => PasswordStrength { score: 2, text: "Cukup", class: "strength-fair" },
        3 => PasswordStrength { score: 3, text: "Baik", class: "strength-good" },
        _ => PasswordStrength { score: 4, text: "Kuat", class: "strength-strong" },
    }
}
