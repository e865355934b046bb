//! Validation utilities for admin forms
//!
//! Rule-per-function validators used by the create and edit dialogs. Each
//! returns `Err` with the message shown under the field, so screens can
//! record outcomes directly into their form state.

use chrono::NaiveDate;

/// Validate that a field is non-empty
pub fn validate_required(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err("This field is required".to_string())
    } else {
        Ok(())
    }
}

/// Validate a whole number (counts, durations)
pub fn validate_number(value: &str) -> Result<u64, String> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| "Must be a whole number".to_string())
}

/// Validate a non-negative price
pub fn validate_price(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(price) if price >= 0.0 => Ok(price),
        Ok(_) => Err("Price cannot be negative".to_string()),
        Err(_) => Err("Invalid price format".to_string()),
    }
}

/// Validate a percentage in the 0..=100 range
pub fn validate_percentage(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(pct) if (0.0..=100.0).contains(&pct) => Ok(pct),
        Ok(_) => Err("Percentage must be between 0 and 100".to_string()),
        Err(_) => Err("Invalid percentage format".to_string()),
    }
}

/// Validate a hex color like `#4F46E5`
pub fn validate_hex_color(value: &str) -> Result<(), String> {
    let value = value.trim();
    let digits = match value.strip_prefix('#') {
        Some(digits) => digits,
        None => return Err("Color must start with '#'".to_string()),
    };
    if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err("Color must be 6 hex digits like #4F46E5".to_string())
    }
}

/// Validate an email address (basic validation)
pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.contains('@') && email.contains('.') && !email.starts_with('@') {
        Ok(())
    } else {
        Err("Invalid email format".to_string())
    }
}

/// Validate a phone number (digits with an optional leading '+')
pub fn validate_phone(phone: &str) -> Result<(), String> {
    let phone = phone.trim();
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.len() >= 10 && digits.len() <= 15 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err("Invalid phone number".to_string())
    }
}

/// Validate a date in `YYYY-MM-DD` form
pub fn validate_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| "Date must be YYYY-MM-DD".to_string())
}

/// Validate a promo code: uppercase letters and digits, 4 to 12 characters
pub fn validate_promo_code(code: &str) -> Result<(), String> {
    let code = code.trim();
    if code.len() >= 4
        && code.len() <= 12
        && code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        Ok(())
    } else {
        Err("Code must be 4-12 uppercase letters or digits".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("Aura Bundle Event").is_ok());
        assert!(validate_required("").is_err());
        assert!(validate_required("   ").is_err());
    }

    #[test]
    fn test_validate_number() {
        assert_eq!(validate_number("60"), Ok(60));
        assert!(validate_number("-5").is_err());
        assert!(validate_number("6.5").is_err());
        assert!(validate_number("abc").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("4.99").is_ok());
        assert!(validate_price("0").is_ok());
        assert!(validate_price("-1").is_err());
        assert!(validate_price("free").is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage("50").is_ok());
        assert!(validate_percentage("100").is_ok());
        assert!(validate_percentage("101").is_err());
        assert!(validate_percentage("-1").is_err());
    }

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#4F46E5").is_ok());
        assert!(validate_hex_color("4F46E5").is_err());
        assert!(validate_hex_color("#4F46").is_err());
        assert!(validate_hex_color("#GGGGGG").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("sabbir@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("01712345678").is_ok());
        assert!(validate_phone("+8801712345678").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("0171-234-5678").is_err());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-06-15").is_ok());
        assert!(validate_date("15/06/2024").is_err());
        assert!(validate_date("2024-13-01").is_err());
    }

    #[test]
    fn test_validate_promo_code() {
        assert!(validate_promo_code("AURA50").is_ok());
        assert!(validate_promo_code("CALL100").is_ok());
        assert!(validate_promo_code("ab").is_err());
        assert!(validate_promo_code("lower50").is_err());
    }
}
