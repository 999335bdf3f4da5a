use std::io;

use tabled::builder::Builder;

use crate::{
    cart::{CartItemId, CartLine, CartViewModel},
    prices::format_price,
};

use super::{ViewError, write_table};

/// A rendered cart line with its quantity controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    /// Cart item id, for update/remove.
    pub item_id: CartItemId,

    /// Product name.
    pub name: String,

    /// Unit price.
    pub unit_price: String,

    /// Units.
    pub quantity: u32,

    /// `unit price × quantity`.
    pub line_total: String,

    /// Whether the decrement control is enabled.
    pub can_decrement: bool,

    /// Whether the increment control is enabled.
    pub can_increment: bool,
}

impl CartLineView {
    fn new(line: &CartLine) -> Result<Self, ViewError> {
        Ok(Self {
            item_id: line.item_id.clone(),
            name: line.name.clone(),
            unit_price: format_price(line.unit_price)?,
            quantity: line.quantity,
            line_total: format_price(line.line_total()?)?,
            can_decrement: line.quantity > 1,
            can_increment: line
                .available
                .is_none_or(|available| line.quantity < available),
        })
    }
}

/// Cart page: lines plus the order summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    /// Lines in server order.
    pub lines: Vec<CartLineView>,

    /// Units across all lines.
    pub item_count: u32,

    /// Subtotal.
    pub subtotal: String,

    /// Tax.
    pub tax: String,

    /// Shipping.
    pub shipping: String,

    /// Grand total.
    pub total: String,
}

impl CartView {
    /// Render a cart view-model.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Price`] when an amount cannot be formatted.
    pub fn new(cart: &CartViewModel) -> Result<Self, ViewError> {
        let totals = cart.totals();

        Ok(Self {
            lines: cart
                .lines()
                .iter()
                .map(CartLineView::new)
                .collect::<Result<_, _>>()?,
            item_count: totals.item_count,
            subtotal: format_price(totals.subtotal)?,
            tax: format_price(totals.tax)?,
            shipping: format_price(totals.shipping)?,
            total: format_price(totals.total)?,
        })
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Write lines and summary.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ViewError> {
        if self.is_empty() {
            writeln!(out, "Your cart is empty")?;

            return Ok(());
        }

        let mut lines = Builder::default();

        lines.push_record(["Item", "Product", "Price", "Qty", "Total"]);

        for line in &self.lines {
            lines.push_record([
                line.item_id.as_str(),
                line.name.as_str(),
                line.unit_price.as_str(),
                line.quantity.to_string().as_str(),
                line.line_total.as_str(),
            ]);
        }

        write_table(&mut out, lines)?;

        let mut summary = Builder::default();

        summary.push_record(["Items", self.item_count.to_string().as_str()]);
        summary.push_record(["Subtotal", self.subtotal.as_str()]);
        summary.push_record(["Tax (10%)", self.tax.as_str()]);
        summary.push_record(["Shipping", self.shipping.as_str()]);
        summary.push_record(["Total", self.total.as_str()]);

        write_table(&mut out, summary)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::cart::Cart;

    use super::*;

    fn cart() -> Result<CartViewModel, Box<dyn std::error::Error>> {
        let cart: Cart = serde_json::from_str(
            r#"{"items": [
                {"_id": "i1", "product": {"_id": "p1", "name": "Shoe", "price": 100, "quantity": 2}, "quantity": 2, "price": 100},
                {"_id": "i2", "product": {"_id": "p2", "name": "Sock", "price": 5, "quantity": 10}, "quantity": 1, "price": 5}
            ]}"#,
        )?;

        Ok(CartViewModel::from_cart(&cart)?)
    }

    #[test]
    fn summary_formats_totals() -> TestResult {
        let view = CartView::new(&cart()?)?;

        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, "$205.00");
        assert_eq!(view.tax, "$20.50");
        assert_eq!(view.shipping, "$5.00");
        assert_eq!(view.total, "$230.50");

        Ok(())
    }

    #[test]
    fn line_controls_follow_quantity_and_stock() -> TestResult {
        let view = CartView::new(&cart()?)?;
        let shoe = view.lines.first().ok_or("missing shoe")?;
        let sock = view.lines.get(1).ok_or("missing sock")?;

        assert!(shoe.can_decrement);
        assert!(!shoe.can_increment);
        assert!(!sock.can_decrement);
        assert!(sock.can_increment);

        Ok(())
    }

    #[test]
    fn empty_cart_renders_message() -> TestResult {
        let view = CartView::new(&CartViewModel::default())?;
        let mut out = Vec::new();

        view.write_to(&mut out)?;

        assert_eq!(String::from_utf8(out)?, "Your cart is empty\n");
        assert_eq!(view.total, "$0.00");

        Ok(())
    }

    #[test]
    fn odd_cent_tax_is_rounded_for_display() -> TestResult {
        let cart: Cart = serde_json::from_str(
            r#"{"items": [{"_id": "i1", "product": "p1", "quantity": 1, "price": 0.15}]}"#,
        )?;
        let model = CartViewModel::from_cart(&cart)?;
        let view = CartView::new(&model)?;

        assert_eq!(model.totals().tax, Decimal::new(15, 3));
        assert_eq!(view.tax, "$0.02");

        Ok(())
    }
}
