//! Catalog records as served by the remote commerce API.
//!
//! These are read-only inputs to the cart: [`crate::cart::CartClient::add`]
//! snapshots a product's stock and the chosen case size at add time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchasable case-size variant of a product.
///
/// `size` is the number of units per case; it doubles as the variant key
/// that distinguishes two cart lines of the same product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseSize {
    pub size: u32,
    pub price: Decimal,
    pub offered_price: Decimal,
    #[serde(default)]
    pub is_default: bool,
}

/// Brand summary attached to catalog products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: String,
}

/// A catalog product with its stock level and case-size variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "_brand", default)]
    pub brand: Option<Brand>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Available units of the product, shared across all case sizes.
    pub stock: u32,
    pub case_sizes: Vec<CaseSize>,
}

impl Product {
    /// The variant marked default, or the first one listed.
    pub fn default_case_size(&self) -> Option<&CaseSize> {
        self.case_sizes
            .iter()
            .find(|c| c.is_default)
            .or_else(|| self.case_sizes.first())
    }
}
