//! Application-wide session state: the cart and the session token.

use crate::SessionError;
use std::sync::{Mutex, MutexGuard, PoisonError};
use stylish_auth::{AuthError, TokenStore};
use stylish_cache::Cache;
use stylish_commerce::prelude::{Cart, CartItem, CommerceError, SessionToken};
use tracing::{debug, warn};

/// Storage key of the cart lines.
pub const CART_KEY: &str = "cartItems";
/// Storage key of the session token.
pub const TOKEN_KEY: &str = "sessionToken";

struct SessionState {
    cache: Cache,
    cart: Cart,
    token: Option<SessionToken>,
}

/// Owner of the cart and the session token.
///
/// State is read from storage once, at construction. Every mutation writes
/// the affected key back before returning; if the write fails the in-memory
/// state is left as it was. [`settle_order`](Self::settle_order) is the one
/// exception.
pub struct SessionStore {
    state: Mutex<SessionState>,
}

impl SessionStore {
    /// Load state from a store.
    ///
    /// A stored cart that no longer parses is discarded.
    pub fn load(cache: Cache) -> Self {
        let cart = match cache.get::<Cart>(CART_KEY) {
            Ok(cart) => cart.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "discarding unreadable stored cart");
                Cart::new()
            }
        };
        let token = match cache.get::<SessionToken>(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "discarding unreadable stored token");
                None
            }
        };

        debug!(lines = cart.line_count(), has_token = token.is_some(), "loaded session");

        Self {
            state: Mutex::new(SessionState { cache, cart, token }),
        }
    }

    /// A session that is never written to disk.
    pub fn in_memory() -> Self {
        Self::load(Cache::in_memory())
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the cart.
    pub fn cart(&self) -> Cart {
        self.state().cart.clone()
    }

    /// The current session token.
    pub fn token(&self) -> Option<SessionToken> {
        self.state().token.clone()
    }

    /// Add a line, merging with an identical variant. Returns the line index.
    pub fn add_item(&self, item: CartItem) -> Result<usize, SessionError> {
        self.mutate_cart(|cart| cart.add_item(item))
    }

    /// Set a line's quantity; zero removes the line.
    pub fn update_quantity(&self, index: usize, quantity: u32) -> Result<(), SessionError> {
        self.mutate_cart(|cart| cart.update_quantity(index, quantity))
    }

    /// Remove a line.
    pub fn remove_item(&self, index: usize) -> Result<CartItem, SessionError> {
        self.mutate_cart(|cart| cart.remove_item(index))
    }

    /// Empty the cart.
    pub fn clear_cart(&self) -> Result<(), SessionError> {
        self.mutate_cart(|cart| {
            cart.clear();
            Ok(())
        })
    }

    /// Remove the lines of a placed order.
    ///
    /// The in-memory cart is updated even when the write fails, so a placed
    /// order is never offered for checkout again. The storage error is still
    /// returned.
    pub fn settle_order(&self, ordered: &Cart) -> Result<(), SessionError> {
        let mut state = self.state();
        state.cart.remove_ordered(ordered);
        let cart = state.cart.clone();
        state.cache.set(CART_KEY, &cart)?;
        Ok(())
    }

    /// Replace the session token.
    pub fn set_token(&self, token: SessionToken) -> Result<(), SessionError> {
        let mut state = self.state();
        state.cache.set(TOKEN_KEY, &token)?;
        state.token = Some(token);
        Ok(())
    }

    /// Forget the session token.
    pub fn clear_token(&self) -> Result<(), SessionError> {
        let mut state = self.state();
        state.cache.delete(TOKEN_KEY)?;
        state.token = None;
        Ok(())
    }

    fn mutate_cart<T>(
        &self,
        f: impl FnOnce(&mut Cart) -> Result<T, CommerceError>,
    ) -> Result<T, SessionError> {
        let mut state = self.state();
        let mut cart = state.cart.clone();
        let value = f(&mut cart)?;
        state.cache.set(CART_KEY, &cart)?;
        state.cart = cart;
        Ok(value)
    }
}

impl TokenStore for SessionStore {
    fn load_token(&self) -> Option<SessionToken> {
        self.token()
    }

    fn store_token(&self, token: &SessionToken) -> Result<(), AuthError> {
        self.set_token(token.clone())
            .map_err(|e| AuthError::Storage(e.to_string()))
    }

    fn clear_token(&self) -> Result<(), AuthError> {
        SessionStore::clear_token(self).map_err(|e| AuthError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use stylish_commerce::prelude::{Money, ProductId};

    fn temp_store(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "stylish-session-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("storage.json")
    }

    fn dress(qty: u32) -> CartItem {
        CartItem::new(ProductId::new("201807201824"), "Dress", Money::new(500), qty)
    }

    #[test]
    fn test_cart_persists_across_restarts() {
        let path = temp_store("cart");
        {
            let session = SessionStore::load(Cache::open(&path).unwrap());
            session.add_item(dress(2)).unwrap();
            session.add_item(dress(1)).unwrap();
        }

        let session = SessionStore::load(Cache::open(&path).unwrap());
        let cart = session.cart();
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, 3);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_token_persists_and_clears() {
        let path = temp_store("token");
        {
            let session = SessionStore::load(Cache::open(&path).unwrap());
            session.set_token(SessionToken::new("tok")).unwrap();
        }
        {
            let session = SessionStore::load(Cache::open(&path).unwrap());
            assert_eq!(session.token().unwrap().expose(), "tok");
            session.clear_token().unwrap();
        }

        let session = SessionStore::load(Cache::open(&path).unwrap());
        assert!(session.token().is_none());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_update_to_zero_removes_line() {
        let session = SessionStore::in_memory();
        session.add_item(dress(2)).unwrap();
        session.update_quantity(0, 0).unwrap();
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_failed_mutation_leaves_cart_unchanged() {
        let session = SessionStore::in_memory();
        session.add_item(dress(2)).unwrap();

        assert!(matches!(
            session.remove_item(5),
            Err(SessionError::Cart(_))
        ));
        assert_eq!(session.cart().line_count(), 1);
    }

    #[test]
    fn test_settle_order_applies_in_memory_when_write_fails() {
        let path = temp_store("settle");
        let session = SessionStore::load(Cache::open(&path).unwrap());
        session.add_item(dress(2)).unwrap();
        let ordered = session.cart();

        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(matches!(
            session.settle_order(&ordered),
            Err(SessionError::Storage(_))
        ));
        assert!(session.cart().is_empty());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_unreadable_cart_is_discarded() {
        let mut cache = Cache::in_memory();
        cache.set(CART_KEY, &"garbage").unwrap();

        let session = SessionStore::load(cache);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_token_store_impl() {
        let session = SessionStore::in_memory();
        TokenStore::store_token(&session, &SessionToken::new("abc")).unwrap();
        assert_eq!(session.load_token().unwrap().expose(), "abc");

        TokenStore::clear_token(&session).unwrap();
        assert!(session.load_token().is_none());
    }
}
