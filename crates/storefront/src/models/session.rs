//! Session-related constants.

/// Session keys for storefront data.
pub mod keys {
    /// Key for storing the session's cart ID.
    pub const CART_ID: &str = "cart_id";
}
