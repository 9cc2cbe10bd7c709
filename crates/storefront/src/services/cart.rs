//! Session-bound cart resolution.
//!
//! Every request that touches the cart goes through [`resolve`]: read the
//! cart id out of the session, load that cart, and fall back to creating a
//! fresh cart when the session has no id or the id no longer resolves
//! (e.g. the cart was swept by cleanup). The session is written only on the
//! creation path.
//!
//! Two concurrent first requests may each create a cart; the last session
//! write wins and the orphan is left for cleanup. Cart creation is cheap
//! enough that this is acceptable.

use thiserror::Error;
use tower_sessions::Session;

use depot_core::CartId;

use crate::db::RepositoryError;
use crate::models::cart::Cart;
use crate::models::session_keys;

/// Errors that can occur while resolving a cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// The session store failed to read or write.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Narrow read/write capability over the session's cart-id entry.
///
/// The resolver takes this instead of a whole session so tests can supply
/// an in-memory slot and handlers can pass the request session as-is.
pub trait CartSession {
    /// Read the cart id stored in the session, if any.
    fn cart_id(
        &self,
    ) -> impl Future<Output = Result<Option<CartId>, tower_sessions::session::Error>> + Send;

    /// Store a cart id in the session.
    fn set_cart_id(
        &self,
        id: CartId,
    ) -> impl Future<Output = Result<(), tower_sessions::session::Error>> + Send;
}

impl CartSession for Session {
    async fn cart_id(&self) -> Result<Option<CartId>, tower_sessions::session::Error> {
        self.get::<CartId>(session_keys::CART_ID).await
    }

    async fn set_cart_id(&self, id: CartId) -> Result<(), tower_sessions::session::Error> {
        self.insert(session_keys::CART_ID, id).await
    }
}

/// Cart persistence as seen by the resolver.
///
/// `find` answers "no such cart" with `Ok(None)`; only real storage
/// failures surface as errors.
pub trait CartStore {
    fn find(
        &self,
        id: CartId,
    ) -> impl Future<Output = Result<Option<Cart>, RepositoryError>> + Send;

    fn create(&self) -> impl Future<Output = Result<Cart, RepositoryError>> + Send;
}

/// Resolve the session's cart, creating one if needed.
///
/// A session id that no longer resolves to a cart is treated exactly like
/// an absent id: a new cart is created and its id written back. The session
/// is left untouched when an existing cart is found.
///
/// # Errors
///
/// Returns [`CartError`] when the session store or the cart storage fails;
/// a missing cart is never an error.
pub async fn resolve<S, R>(session: &S, carts: &R) -> Result<Cart, CartError>
where
    S: CartSession,
    R: CartStore,
{
    if let Some(id) = session.cart_id().await? {
        if let Some(cart) = carts.find(id).await? {
            return Ok(cart);
        }
        tracing::debug!(cart_id = %id, "session referenced a missing cart, creating a new one");
    }

    let cart = carts.create().await?;
    session.set_cart_id(cart.id).await?;
    tracing::debug!(cart_id = %cart.id, "created cart for session");
    Ok(cart)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

    use chrono::Utc;

    use super::*;

    #[derive(Default)]
    struct FakeSession {
        slot: Mutex<Option<CartId>>,
        writes: AtomicUsize,
    }

    impl FakeSession {
        fn with_cart_id(id: CartId) -> Self {
            Self {
                slot: Mutex::new(Some(id)),
                writes: AtomicUsize::new(0),
            }
        }
    }

    impl CartSession for FakeSession {
        async fn cart_id(&self) -> Result<Option<CartId>, tower_sessions::session::Error> {
            Ok(*self.slot.lock().unwrap())
        }

        async fn set_cart_id(&self, id: CartId) -> Result<(), tower_sessions::session::Error> {
            *self.slot.lock().unwrap() = Some(id);
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Default)]
    struct InMemoryCarts {
        carts: Mutex<HashMap<CartId, Cart>>,
        next_id: AtomicI32,
    }

    impl InMemoryCarts {
        fn with_cart(id: CartId) -> Self {
            let store = Self {
                next_id: AtomicI32::new(id.as_i32()),
                ..Self::default()
            };
            let cart = Cart {
                id,
                created_at: Utc::now(),
            };
            store.carts.lock().unwrap().insert(id, cart);
            store
        }
    }

    impl CartStore for InMemoryCarts {
        async fn find(&self, id: CartId) -> Result<Option<Cart>, RepositoryError> {
            Ok(self.carts.lock().unwrap().get(&id).cloned())
        }

        async fn create(&self) -> Result<Cart, RepositoryError> {
            let id = CartId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
            let cart = Cart {
                id,
                created_at: Utc::now(),
            };
            self.carts.lock().unwrap().insert(id, cart.clone());
            Ok(cart)
        }
    }

    struct BrokenCarts;

    impl CartStore for BrokenCarts {
        async fn find(&self, _id: CartId) -> Result<Option<Cart>, RepositoryError> {
            Err(RepositoryError::Database(sqlx::Error::PoolClosed))
        }

        async fn create(&self) -> Result<Cart, RepositoryError> {
            Err(RepositoryError::Database(sqlx::Error::PoolClosed))
        }
    }

    #[tokio::test]
    async fn empty_session_gets_a_new_cart_and_the_id_is_stored() {
        let session = FakeSession::default();
        let carts = InMemoryCarts::default();

        let cart = resolve(&session, &carts).await.unwrap();

        assert_eq!(*session.slot.lock().unwrap(), Some(cart.id));
        assert_eq!(session.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn existing_cart_is_returned_and_the_session_is_untouched() {
        let id = CartId::new(7);
        let session = FakeSession::with_cart_id(id);
        let carts = InMemoryCarts::with_cart(id);

        let cart = resolve(&session, &carts).await.unwrap();

        assert_eq!(cart.id, id);
        assert_eq!(session.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn stale_cart_id_falls_through_to_creation() {
        let session = FakeSession::with_cart_id(CartId::new(999));
        let carts = InMemoryCarts::default();

        let cart = resolve(&session, &carts).await.unwrap();

        assert_ne!(cart.id, CartId::new(999));
        assert_eq!(*session.slot.lock().unwrap(), Some(cart.id));
        assert_eq!(session.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn resolving_twice_yields_the_same_cart() {
        let session = FakeSession::default();
        let carts = InMemoryCarts::default();

        let first = resolve(&session, &carts).await.unwrap();
        let second = resolve(&session, &carts).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(session.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let session = FakeSession::default();

        let err = resolve(&session, &BrokenCarts).await.unwrap_err();

        assert!(matches!(err, CartError::Repository(_)));
        assert!(session.slot.lock().unwrap().is_none());
    }
}
