//! Money helpers shared by the ledger and the receipt formatter.
//!
//! All prices are [`Decimal`]; display is always two decimal places with
//! half-up rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use bakery_core::money::round_half_up;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_half_up(dec!(1.234)), dec!(1.23));
/// assert_eq!(round_half_up(dec!(1.235)), dec!(1.24));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with exactly two decimals (`1.3` → `"1.30"`).
///
/// ```
/// use bakery_core::money::format_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_amount(dec!(1.3)), "1.30");
/// assert_eq!(format_amount(dec!(12)), "12.00");
/// ```
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);
    rounded.to_string()
}
