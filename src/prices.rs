//! Prices

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Errors raised while converting API amounts into money.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// The amount does not fit in minor units.
    #[error("price {0} is out of range")]
    OutOfRange(Decimal),
}

/// Currency every storefront amount is quoted in.
#[must_use]
pub fn store_currency() -> &'static Currency {
    iso::USD
}

/// Round an amount to cents, half away from zero.
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a major-unit decimal amount (`19.99`) into money.
///
/// # Errors
///
/// Returns [`PriceError::OutOfRange`] when the amount cannot be represented
/// in minor units.
pub fn to_money(amount: Decimal) -> Result<Money<'static, Currency>, PriceError> {
    let minor = round_to_cents(amount)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|minor| minor.to_i64());

    let Some(minor) = minor else {
        return Err(PriceError::OutOfRange(amount));
    };

    Ok(Money::from_minor(minor, store_currency()))
}

/// Format money as a display string, e.g. `$75.00`.
#[must_use]
pub fn format_money(money: &Money<'_, Currency>) -> String {
    let minor_units = money.to_minor_units();
    let abs_minor = minor_units.unsigned_abs();
    let sign = if minor_units < 0 { "-" } else { "" };

    format!(
        "{sign}{}{}.{:02}",
        money.currency().symbol,
        abs_minor / 100,
        abs_minor % 100
    )
}

/// Convert and format a decimal amount in one step.
///
/// # Errors
///
/// Returns [`PriceError::OutOfRange`] when the amount cannot be represented
/// in minor units.
pub fn format_price(amount: Decimal) -> Result<String, PriceError> {
    Ok(format_money(&to_money(amount)?))
}
