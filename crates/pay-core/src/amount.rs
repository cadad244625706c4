//! # Amounts
//!
//! Caller amounts arrive in whole rupees and leave for the gateway in
//! paise. Integer arithmetic only.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};

/// Number of subunits (paise) per major unit (rupee)
pub const SUBUNITS_PER_MAJOR: u64 = 100;

/// Largest accepted major-unit amount.
///
/// Caller amounts are parsed as unsigned 32-bit integers, so the paise
/// value never exceeds `u32::MAX * 100`, well inside `u64`.
pub const MAX_MAJOR_AMOUNT: u64 = u32::MAX as u64;

/// Amount in the smallest currency unit (paise)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subunits(u64);

impl Subunits {
    /// Convert a whole-unit amount to subunits
    pub fn from_major(major: u64) -> PaymentResult<Self> {
        if major > MAX_MAJOR_AMOUNT {
            return Err(PaymentError::InvalidAmount(format!(
                "{} exceeds the maximum of {}",
                major, MAX_MAJOR_AMOUNT
            )));
        }
        major
            .checked_mul(SUBUNITS_PER_MAJOR)
            .map(Self)
            .ok_or_else(|| PaymentError::InvalidAmount(format!("{} overflows", major)))
    }

    /// Parse a caller-supplied major-unit amount (e.g. `?amount=30`).
    ///
    /// Digits only: no sign, no surrounding whitespace.
    pub fn parse_major(raw: &str) -> PaymentResult<Self> {
        if raw.is_empty() {
            return Err(PaymentError::InvalidAmount("amount is required".to_string()));
        }

        let invalid = || {
            PaymentError::InvalidAmount(format!(
                "'{}' is not a whole number between 0 and {}",
                raw, MAX_MAJOR_AMOUNT
            ))
        };

        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let major: u32 = raw.parse().map_err(|_| invalid())?;

        Self::from_major(u64::from(major))
    }

    /// Raw subunit value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Format for display (e.g., "₹30.00")
    pub fn display(&self) -> String {
        format!(
            "₹{}.{:02}",
            self.0 / SUBUNITS_PER_MAJOR,
            self.0 % SUBUNITS_PER_MAJOR
        )
    }
}

impl std::fmt::Display for Subunits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirty_rupees_is_three_thousand_paise() {
        assert_eq!(Subunits::parse_major("30").unwrap().value(), 3000);
    }

    #[test]
    fn test_zero_is_accepted() {
        assert_eq!(Subunits::parse_major("0").unwrap().value(), 0);
    }

    #[test]
    fn test_maximum_amount_does_not_overflow() {
        let max = Subunits::parse_major("4294967295").unwrap();
        assert_eq!(max.value(), 429_496_729_500);
    }

    #[test]
    fn test_rejects_unparseable_amounts() {
        for raw in ["", "  ", " 30", "30 ", "+5", "-5", "12.50", "abc", "4294967296"] {
            let err = Subunits::parse_major(raw).unwrap_err();
            assert!(matches!(err, PaymentError::InvalidAmount(_)), "{raw:?}");
        }
    }

    #[test]
    fn test_from_major_guards_maximum() {
        assert!(Subunits::from_major(MAX_MAJOR_AMOUNT + 1).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Subunits::parse_major("30").unwrap().display(), "₹30.00");
    }
}
