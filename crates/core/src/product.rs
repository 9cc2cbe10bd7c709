//! The candidate product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as submitted for creation, before any validation or persistence.
///
/// String fields default to empty (an absent field and a blank field are
/// treated alike by validation); price is `None` when absent, since "blank"
/// and "zero" are different violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub image_url: String,
}

impl ProductDraft {
    /// Create a draft with every field populated.
    #[must_use]
    pub fn new(title: &str, description: &str, price: Decimal, image_url: &str) -> Self {
        Self {
            title: title.to_owned(),
            description: description.to_owned(),
            price: Some(price),
            image_url: image_url.to_owned(),
        }
    }
}
