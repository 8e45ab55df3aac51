//! Product records as served by the catalog endpoint.
use crate::price::Price;
use serde::{Deserialize, Serialize};

pub type ProductId = u32;

/// A single catalog entry. Identity is the `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub description: String,
    /// Image URL
    pub image: String,
}

impl Product {
    /// Case-insensitive substring match against name or description.
    ///
    /// `needle` must already be lower-cased; an empty needle matches everything.
    #[must_use]
    pub fn matches_lowered(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}
