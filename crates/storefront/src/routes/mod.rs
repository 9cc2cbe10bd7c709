//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies database)
//!
//! # Cart
//! GET  /cart                   - Resolve the session's cart (creates one if needed)
//!
//! # Products
//! POST /products               - Validate and create a product
//! POST /products/validate      - Validate a draft without persisting it
//! ```

pub mod cart;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show))
        .route("/products", post(products::create))
        .route("/products/validate", post(products::validate))
}
