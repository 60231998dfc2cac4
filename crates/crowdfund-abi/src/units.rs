// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Decimal currency amounts <-> smallest-unit integers (18 decimals).

use alloy_primitives::utils::{format_ether, parse_ether};
use alloy_primitives::U256;
use thiserror::Error;

/// Decimal places of the chain's currency.
pub const DECIMALS: usize = 18;

/// Rejected decimal amount input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UnitsError {
    /// Input was empty or whitespace only.
    #[error("amount is empty")]
    Empty,
    /// Input carried a minus sign.
    #[error("amount must not be negative: {0:?}")]
    Negative(String),
    /// Input is not a decimal number representable in smallest units.
    #[error("invalid amount {input:?}: {reason}")]
    Invalid {
        /// The rejected input (trimmed).
        input: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Parse a decimal amount such as `"1.5"` into smallest units.
///
/// Surrounding whitespace is ignored. Negative values and anything that is
/// not a plain decimal number are rejected.
pub fn parse_amount(input: &str) -> Result<U256, UnitsError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UnitsError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(UnitsError::Negative(trimmed.to_string()));
    }
    check_decimal(trimmed)?;
    parse_ether(trimmed).map_err(|err| UnitsError::Invalid {
        input: trimmed.to_string(),
        reason: err.to_string(),
    })
}

/// Plain `digits[.digits]` with at most [`DECIMALS`] fraction digits.
///
/// `parse_ether` alone truncates extra fraction digits and accepts `_`
/// separators, so both are refused here.
fn check_decimal(input: &str) -> Result<(), UnitsError> {
    let invalid = |reason: &str| UnitsError::Invalid {
        input: input.to_string(),
        reason: reason.to_string(),
    };
    let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(invalid("expected a plain decimal number"));
    }
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("no digits"));
    }
    if fraction.len() > DECIMALS {
        return Err(invalid("more than 18 decimal places"));
    }
    Ok(())
}

/// Format smallest units as a decimal amount without trailing zeros
/// (`5e18 -> "5"`, `1.5e18 -> "1.5"`).
pub fn format_amount(amount: U256) -> String {
    trim_fraction(&format_ether(amount))
}

fn trim_fraction(formatted: &str) -> String {
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => formatted.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
    }

    #[test]
    fn parses_fractional_goal() {
        let expected = U256::from(1_500_000_000_000_000_000u128);
        assert_eq!(parse_amount("1.5").unwrap(), expected);
    }

    #[test]
    fn parses_whole_and_padded_input() {
        assert_eq!(parse_amount("5").unwrap(), ether(5));
        assert_eq!(parse_amount("  2 ").unwrap(), ether(2));
        assert_eq!(parse_amount("0").unwrap(), U256::ZERO);
    }

    #[test]
    fn rejects_empty_negative_and_garbage() {
        assert_eq!(parse_amount(""), Err(UnitsError::Empty));
        assert_eq!(parse_amount("   "), Err(UnitsError::Empty));
        assert!(matches!(parse_amount("-1"), Err(UnitsError::Negative(_))));
        assert!(matches!(parse_amount("abc"), Err(UnitsError::Invalid { .. })));
        assert!(matches!(parse_amount("1.2.3"), Err(UnitsError::Invalid { .. })));
        assert!(matches!(parse_amount("."), Err(UnitsError::Invalid { .. })));
        assert!(matches!(parse_amount("1e18"), Err(UnitsError::Invalid { .. })));
    }

    #[test]
    fn rejects_precision_beyond_smallest_unit() {
        assert!(matches!(
            parse_amount("0.0000000000000000009"),
            Err(UnitsError::Invalid { .. })
        ));
        assert!(matches!(
            parse_amount("1.0000000000000000001"),
            Err(UnitsError::Invalid { .. })
        ));
        assert_eq!(parse_amount("0.000000000000000001").unwrap(), U256::from(1u64));
    }

    #[test]
    fn rejects_digit_separators() {
        assert!(matches!(parse_amount("1_000"), Err(UnitsError::Invalid { .. })));
        assert!(matches!(parse_amount("0._5"), Err(UnitsError::Invalid { .. })));
    }

    #[test]
    fn formats_without_trailing_zeros() {
        assert_eq!(format_amount(ether(5)), "5");
        assert_eq!(format_amount(ether(2)), "2");
        assert_eq!(format_amount(U256::ZERO), "0");
        assert_eq!(format_amount(U256::from(1_500_000_000_000_000_000u128)), "1.5");
        assert_eq!(format_amount(U256::from(1u64)), "0.000000000000000001");
    }

    #[test]
    fn trim_keeps_integers_untouched() {
        assert_eq!(trim_fraction("10"), "10");
        assert_eq!(trim_fraction("10.000"), "10");
        assert_eq!(trim_fraction("10.0500"), "10.05");
    }
}
