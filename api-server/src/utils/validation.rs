//! Input validation helpers
//!
//! Centralized text length constants and validation functions. Order payload
//! validation collects every violation before reporting, so a request with
//! three bad lines gets all three back in one response.

use shared::{AppError, AppResult};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: restaurant, dish, voucher code, display name
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions (customer notes, rejection reason, etc.)
pub const MAX_NOTE_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Address fields
pub const MAX_ADDRESS_LEN: usize = 500;

/// Line item quantity bounds
pub const MIN_QUANTITY: i32 = 1;
pub const MAX_QUANTITY: i32 = 99;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Collect a violation into `errors` instead of failing on the first.
///
/// Used by order creation, which batches all violations into one
/// ValidationFailed response.
pub fn collect_required_text(errors: &mut Vec<String>, value: &str, field: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{field} must not be empty"));
    }
}

/// Collect a quantity bound violation into `errors`.
pub fn collect_quantity(errors: &mut Vec<String>, quantity: i32, field: &str) {
    if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
        errors.push(format!(
            "{field} must be between {MIN_QUANTITY} and {MAX_QUANTITY}, got {quantity}"
        ));
    }
}

/// Validate an email shape (presence of a single `@` with non-empty sides)
pub fn validate_email(email: &str) -> AppResult<()> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AppError::validation(format!("Invalid email: {email}")));
    }
    Ok(())
}

/// Validate a password length window
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password is too long (max {MAX_PASSWORD_LEN} characters)"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Pizzeria Roma", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_collect_quantity_bounds() {
        let mut errors = Vec::new();
        collect_quantity(&mut errors, 1, "items[0].quantity");
        collect_quantity(&mut errors, 99, "items[1].quantity");
        assert!(errors.is_empty());

        collect_quantity(&mut errors, 0, "items[2].quantity");
        collect_quantity(&mut errors, 100, "items[3].quantity");
        collect_quantity(&mut errors, -4, "items[4].quantity");
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("items[2].quantity"));
    }

    #[test]
    fn test_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("noatsign.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ana@nodot").is_err());
    }

    #[test]
    fn test_password() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }
}
