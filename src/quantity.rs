//! Quantity Stepper

/// Quantity picker bounded below by 1 and above by available stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityStepper {
    quantity: u32,
    available: u32,
}

impl QuantityStepper {
    /// Start at 1 for a product with `available` units.
    #[must_use]
    pub fn new(available: u32) -> Self {
        Self {
            quantity: 1,
            available,
        }
    }

    /// Start at an existing quantity, e.g. a cart line.
    #[must_use]
    pub fn with_quantity(quantity: u32, available: u32) -> Self {
        let mut stepper = Self::new(available);
        stepper.set(quantity);

        stepper
    }

    /// Selected quantity, never below 1.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Units in stock.
    #[must_use]
    pub fn available(&self) -> u32 {
        self.available
    }

    /// Whether the decrement control is enabled.
    #[must_use]
    pub fn can_decrement(&self) -> bool {
        self.quantity > 1
    }

    /// Whether the increment control is enabled.
    #[must_use]
    pub fn can_increment(&self) -> bool {
        self.quantity < self.available
    }

    /// Step up by one. Returns whether the quantity changed.
    pub fn increment(&mut self) -> bool {
        if !self.can_increment() {
            return false;
        }

        self.quantity += 1;

        true
    }

    /// Step down by one. Returns whether the quantity changed.
    pub fn decrement(&mut self) -> bool {
        if !self.can_decrement() {
            return false;
        }

        self.quantity -= 1;

        true
    }

    /// Set a typed-in quantity, clamped to `1..=available`.
    pub fn set(&mut self, quantity: u32) {
        self.quantity = quantity.clamp(1, self.available.max(1));
    }
}
