//! Domain models persisted by the storefront.

pub mod cart;
pub mod product;
pub mod session;

pub use session::keys as session_keys;
