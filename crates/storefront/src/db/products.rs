//! Product repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use depot_core::{ProductDraft, ProductId};

use super::RepositoryError;
use crate::models::product::Product;
use crate::services::catalog::ProductStore;

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    title: String,
    description: String,
    price: Decimal,
    image_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for product database operations.
///
/// Used by the catalog service through the [`ProductStore`] seam.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl ProductStore for ProductRepository<'_> {
    /// Whether any persisted product carries exactly this title.
    ///
    /// Exact string match, including case.
    async fn title_taken(&self, title: &str) -> Result<bool, RepositoryError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (SELECT 1 FROM products WHERE title = $1)
            ",
        )
        .bind(title)
        .fetch_one(self.pool)
        .await?;

        Ok(taken)
    }

    /// Insert a validated draft as a new product.
    ///
    /// A unique index on `products.title` backs the uniqueness rule; losing
    /// the race between validation and insert surfaces as
    /// `RepositoryError::Conflict`.
    async fn insert(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO products (title, description, price, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, price, image_url, created_at, updated_at
            ",
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(&draft.image_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("title already taken".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }
}
