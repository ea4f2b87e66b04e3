//! Voucher and referral code types with typed input validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum accepted length for a normalized code.
pub const MAX_CODE_LEN: usize = 32;

/// How a voucher affects the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherKind {
    /// Discounts the subtotal by a percentage (`value` = percent).
    Percentage,

    /// Discounts the subtotal by a fixed amount (`value` = cents).
    Fixed,

    /// Grants bonus points on top of the base earn rate (`value` = points).
    Points,
}

impl VoucherKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            VoucherKind::Percentage => "percentage",
            VoucherKind::Fixed => "fixed",
            VoucherKind::Points => "points",
        }
    }
}

impl std::fmt::Display for VoucherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A voucher resolved by the code catalog.
///
/// At most one voucher is active per cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherCode {
    /// The normalized code string the customer entered.
    pub code: String,

    /// Discount behavior.
    pub kind: VoucherKind,

    /// Percent, cents, or points depending on `kind`.
    pub value: i64,
}

impl VoucherCode {
    /// Creates a resolved voucher.
    pub fn new(code: impl Into<String>, kind: VoucherKind, value: i64) -> Self {
        Self {
            code: code.into(),
            kind,
            value,
        }
    }
}

/// A referral code identifying the referring customer.
///
/// The reward amount is resolved server-side; this type only carries the
/// identifier. At most one referral is active per cart, independent of
/// any voucher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferralCode(String);

impl ReferralCode {
    /// Creates a referral code from an already-normalized string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReferralCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rejections for raw code input, before any backend lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeInputError {
    /// Input was empty or whitespace only.
    #[error("code must not be empty")]
    Empty,

    /// Input exceeded the maximum code length.
    #[error("code is too long: {len} characters (maximum {MAX_CODE_LEN})")]
    TooLong { len: usize },

    /// Input contained a character outside `[A-Za-z0-9-]`.
    #[error("code contains invalid character '{found}'")]
    InvalidCharacter { found: char },
}

/// Normalizes raw user input into a canonical code string.
///
/// Trims surrounding whitespace and uppercases; accepts ASCII alphanumerics
/// and hyphens only. Returns the normalized code or a typed rejection.
pub fn normalize_code_input(raw: &str) -> Result<String, CodeInputError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(CodeInputError::Empty);
    }

    if trimmed.len() > MAX_CODE_LEN {
        return Err(CodeInputError::TooLong { len: trimmed.len() });
    }

    if let Some(found) = trimmed
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
    {
        return Err(CodeInputError::InvalidCharacter { found });
    }

    Ok(trimmed.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_uppercases() {
        assert_eq!(normalize_code_input("  summer20 ").unwrap(), "SUMMER20");
    }

    #[test]
    fn test_normalize_accepts_hyphens() {
        assert_eq!(normalize_code_input("REF-A1B2").unwrap(), "REF-A1B2");
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(normalize_code_input(""), Err(CodeInputError::Empty));
        assert_eq!(normalize_code_input("   "), Err(CodeInputError::Empty));
    }

    #[test]
    fn test_overlong_input_rejected() {
        let raw = "A".repeat(MAX_CODE_LEN + 1);
        assert_eq!(
            normalize_code_input(&raw),
            Err(CodeInputError::TooLong {
                len: MAX_CODE_LEN + 1
            })
        );
    }

    #[test]
    fn test_invalid_character_rejected() {
        assert_eq!(
            normalize_code_input("SUMMER 20"),
            Err(CodeInputError::InvalidCharacter { found: ' ' })
        );
        assert_eq!(
            normalize_code_input("CODE!"),
            Err(CodeInputError::InvalidCharacter { found: '!' })
        );
    }

    #[test]
    fn test_max_length_accepted() {
        let raw = "B".repeat(MAX_CODE_LEN);
        assert_eq!(normalize_code_input(&raw).unwrap(), raw);
    }

    #[test]
    fn test_voucher_kind_serialization() {
        let json = serde_json::to_string(&VoucherKind::Percentage).unwrap();
        assert_eq!(json, "\"percentage\"");
        let kind: VoucherKind = serde_json::from_str("\"fixed\"").unwrap();
        assert_eq!(kind, VoucherKind::Fixed);
    }

    #[test]
    fn test_voucher_serialization_roundtrip() {
        let voucher = VoucherCode::new("SUMMER20", VoucherKind::Percentage, 20);
        let json = serde_json::to_string(&voucher).unwrap();
        let deserialized: VoucherCode = serde_json::from_str(&json).unwrap();
        assert_eq!(voucher, deserialized);
    }
}
