//! Cart route handlers.
//!
//! The cart is bound to the session: the first request without a usable
//! `cart_id` entry creates one and stores its id, later requests get the
//! same cart back.

use axum::{Json, extract::State};
use tower_sessions::Session;
use tracing::instrument;

use crate::db::CartRepository;
use crate::error::Result;
use crate::models::cart::Cart;
use crate::services;
use crate::state::AppState;

/// `GET /cart` - resolve the session's cart, creating one if needed.
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<Cart>> {
    let carts = CartRepository::new(state.pool());
    let cart = services::cart::resolve(&session, &carts).await?;
    Ok(Json(cart))
}
