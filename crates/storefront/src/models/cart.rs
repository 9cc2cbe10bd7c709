//! Cart model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use depot_core::CartId;

/// A per-session shopping cart.
///
/// Created lazily on first session access that lacks a valid cart id.
/// Line items will hang off this record once checkout lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cart {
    pub id: CartId,
    pub created_at: DateTime<Utc>,
}
