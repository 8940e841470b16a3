//! Input validation helpers
//!
//! Centralized text length constants and field validation functions used by
//! the CRUD handlers and the checkout wizard. Limits are chosen based on
//! reasonable UX limits for names, notes and descriptions; the document
//! store has no built-in length enforcement.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product title, category name, banner title, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, reasons (cancel reason, admin note, etc.)
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: SKU, size/style labels, color codes, etc.
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
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
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        if v.len() > max_len {
            return Err(AppError::validation(format!(
                "{field} is too long ({} chars, max {max_len})",
                v.len()
            )));
        }
    }
    Ok(())
}

// ── Checkout field rules ────────────────────────────────────────────

/// Minimal structural email check: one '@', non-empty local part, and a
/// domain containing a dot. Deliverability is not our problem.
pub fn validate_email(value: &str) -> Result<(), AppError> {
    if value.len() > MAX_EMAIL_LEN {
        return Err(AppError::validation("email is too long"));
    }
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.ends_with('.') {
        return Err(AppError::validation(format!("invalid email: {value}")));
    }
    Ok(())
}

/// Phone numbers are exactly 10 digits.
pub fn validate_phone(value: &str) -> Result<(), AppError> {
    if value.len() != 10 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::validation("phone must be exactly 10 digits"));
    }
    Ok(())
}

/// Postal pincodes are exactly 6 digits.
pub fn validate_pincode(value: &str) -> Result<(), AppError> {
    if value.len() != 6 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::validation("pincode must be exactly 6 digits"));
    }
    Ok(())
}

/// Card numbers are 16 digits (spaces allowed between groups).
pub fn validate_card_number(value: &str) -> Result<(), AppError> {
    let digits: Vec<u8> = value.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.len() != 16 || !digits.iter().all(|b| b.is_ascii_digit()) {
        return Err(AppError::validation("card number must be 16 digits"));
    }
    Ok(())
}

/// Card expiry in MM/YY form, month 01-12.
pub fn validate_card_expiry(value: &str) -> Result<(), AppError> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b'/'
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit();
    if !well_formed {
        return Err(AppError::validation("expiry must be in MM/YY format"));
    }
    let month: u8 = value[..2].parse().unwrap_or(0);
    if !(1..=12).contains(&month) {
        return Err(AppError::validation("expiry month must be 01-12"));
    }
    Ok(())
}

/// CVV is exactly 3 digits.
pub fn validate_cvv(value: &str) -> Result<(), AppError> {
    if value.len() != 3 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::validation("CVV must be exactly 3 digits"));
    }
    Ok(())
}
