//! Cart line items and their identity key.

use serde::{Deserialize, Serialize};

use super::catalog::{Brand, CaseSize, Product};

/// Identity of a cart line: at most one line exists per product/case-size
/// pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: String,
    pub size: u32,
}

/// One case-size variant of a product in the cart.
///
/// `stock` is a snapshot of the *product's* available units taken when the
/// line was created, not a per-variant figure. The cart actor checks every
/// mutation against it, aggregated across all lines of the same product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub brand: Brand,
    #[serde(default)]
    pub image: String,
    pub case_size: CaseSize,
    pub quantity: u32,
    pub stock: u32,
}

impl CartLine {
    /// The first line for a variant: quantity 1, stock snapshot captured.
    pub fn first(product: &Product, case_size: &CaseSize) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            brand: product.brand.clone().unwrap_or_default(),
            image: product.images.first().cloned().unwrap_or_default(),
            case_size: case_size.clone(),
            quantity: 1,
            stock: product.stock,
        }
    }

    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            size: self.case_size.size,
        }
    }

    /// Units of the underlying product this line consumes.
    pub fn units(&self) -> u32 {
        self.quantity * self.case_size.size
    }
}
