//! Shared client state.
//!
//! A single [`Store`] is built at startup and handed to every service that
//! reads or publishes session and cart state. Subscribers always observe the
//! latest value.

use std::sync::Arc;

use storefront::{cart::CartViewModel, users::UserId};
use tokio::sync::watch;

/// Session and cart state shared across services.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    /// Whether a session is present.
    pub authenticated: bool,

    /// Signed-in user, when known.
    pub user: Option<UserId>,

    /// Last cart fetched from the server.
    pub cart: CartViewModel,
}

/// Injectable state container.
#[derive(Debug, Clone)]
pub struct Store {
    state: Arc<watch::Sender<AppState>>,
}

impl Store {
    #[must_use]
    pub fn new(initial: AppState) -> Self {
        let (state, _) = watch::channel(initial);

        Self {
            state: Arc::new(state),
        }
    }

    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().authenticated
    }

    #[must_use]
    pub fn user(&self) -> Option<UserId> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn cart(&self) -> CartViewModel {
        self.state.borrow().cart.clone()
    }

    /// Mutate the state in place and wake subscribers.
    pub fn update(&self, modify: impl FnOnce(&mut AppState)) {
        self.state.send_modify(modify);
    }

    /// Replace the cart.
    pub fn set_cart(&self, cart: CartViewModel) {
        self.update(|state| state.cart = cart);
    }

    /// Receiver that sees every subsequent update.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

#[cfg(test)]
mod tests {
    use storefront::cart::Cart;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn subscribers_see_cart_updates() -> TestResult {
        let store = Store::default();
        let mut updates = store.subscribe();

        let cart: Cart = serde_json::from_str(
            r#"{"items": [{"_id": "i1", "product": "p1", "quantity": 2, "price": 3}]}"#,
        )?;

        store.set_cart(CartViewModel::from_cart(&cart)?);

        updates.changed().await?;

        assert_eq!(updates.borrow_and_update().cart.item_count(), 2);
        assert_eq!(store.cart().item_count(), 2);

        Ok(())
    }

    #[test]
    fn signing_in_flips_authentication() {
        let store = Store::default();

        store.update(|state| {
            state.authenticated = true;
            state.user = Some(UserId::new("u1"));
        });

        assert!(store.is_authenticated());
        assert_eq!(store.user(), Some(UserId::new("u1")));
    }
}
