//! Pricing
//!
//! Discounted shelf prices and cart totals. Totals are always derived from a
//! full list of lines; nothing here accumulates across calls.

use rust_decimal::Decimal;

use crate::prices::{PriceError, round_to_cents};

/// Sales tax applied to the cart subtotal (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Flat shipping charged on any non-empty cart.
pub const FLAT_SHIPPING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Clamp a discount percentage into `0..=100`.
#[must_use]
pub fn clamp_discount(discount: Decimal) -> Decimal {
    discount.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Price after applying a percentage discount, rounded to cents.
///
/// A zero discount leaves the price unchanged.
#[must_use]
pub fn discounted_price(price: Decimal, discount: Decimal) -> Decimal {
    let discount = clamp_discount(discount);

    if discount.is_zero() {
        return round_to_cents(price);
    }

    round_to_cents(price * (Decimal::ONE - discount / Decimal::ONE_HUNDRED))
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of quantities across lines.
    pub item_count: u32,

    /// Sum of `unit price × quantity`.
    pub subtotal: Decimal,

    /// Tax on the subtotal.
    pub tax: Decimal,

    /// Shipping charge.
    pub shipping: Decimal,

    /// `subtotal + tax + shipping`.
    pub total: Decimal,
}

impl CartTotals {
    /// Compute totals from `(unit price, quantity)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::OutOfRange`] when a line or the running total
    /// overflows.
    pub fn from_lines<I>(lines: I) -> Result<Self, PriceError>
    where
        I: IntoIterator<Item = (Decimal, u32)>,
    {
        let mut item_count = 0_u32;
        let mut subtotal = Decimal::ZERO;

        for (unit_price, quantity) in lines {
            let line = line_total(unit_price, quantity)?;

            item_count = item_count.saturating_add(quantity);
            subtotal = subtotal
                .checked_add(line)
                .ok_or(PriceError::OutOfRange(line))?;
        }

        // Tax never exceeds the subtotal, so only the sum can overflow.
        let tax = subtotal * TAX_RATE;
        let shipping = if subtotal > Decimal::ZERO {
            FLAT_SHIPPING
        } else {
            Decimal::ZERO
        };
        let total = subtotal
            .checked_add(tax)
            .and_then(|total| total.checked_add(shipping))
            .ok_or(PriceError::OutOfRange(subtotal))?;

        Ok(Self {
            item_count,
            subtotal,
            tax,
            shipping,
            total,
        })
    }
}

/// `unit_price × quantity`.
///
/// # Errors
///
/// Returns [`PriceError::OutOfRange`] when the product overflows.
pub fn line_total(unit_price: Decimal, quantity: u32) -> Result<Decimal, PriceError> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or(PriceError::OutOfRange(unit_price))
}
