//! Cart repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use depot_core::CartId;

use super::RepositoryError;
use crate::models::cart::Cart;
use crate::services::cart::CartStore;

#[derive(sqlx::FromRow)]
struct CartRow {
    id: CartId,
    created_at: DateTime<Utc>,
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
        }
    }
}

/// Repository for cart database operations.
///
/// Used by the cart resolver through the [`CartStore`] seam.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl CartStore for CartRepository<'_> {
    /// Look up a cart by ID.
    ///
    /// A missing row is `Ok(None)`, not an error; the resolver treats it as
    /// a stale session entry and falls through to creation.
    async fn find(&self, id: CartId) -> Result<Option<Cart>, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            SELECT id, created_at
            FROM carts
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Cart::from))
    }

    /// Create a new, empty cart.
    async fn create(&self) -> Result<Cart, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            INSERT INTO carts DEFAULT VALUES
            RETURNING id, created_at
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
