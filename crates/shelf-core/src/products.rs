use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One catalog item as delivered by the remote listing endpoint, normalized
/// for caching and display.
///
/// Products are immutable values: a changed product is a new `Product`, never
/// an in-place mutation. Field names are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable unique identifier assigned by the catalog.
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    /// List price, non-negative. Kept as a decimal to avoid float drift in
    /// money math.
    pub price: Decimal,
    /// Percentage in `0..=100`.
    pub discount_percentage: Decimal,
    pub rating: f64,
    pub stock: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Not every catalog item carries a brand.
    #[serde(default)]
    pub brand: Option<String>,
    pub sku: String,
    /// Thumbnail image URL.
    pub thumbnail: String,
    /// Full-size image URLs, in catalog order.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Price after applying `discount_percentage`.
    ///
    /// Always recomputed from `price`; never stored.
    #[must_use]
    pub fn discounted_price(&self) -> Decimal {
        self.price * (Decimal::ONE - self.discount_percentage / Decimal::ONE_HUNDRED)
    }
}

/// A paginated slice of the catalog, addressed by `skip`/`limit`.
///
/// `products` preserves the producing source's return order. `total` is the
/// catalog size *as reported by whichever source produced the page*: the
/// remote endpoint reports the full catalog size, while the local store
/// reports its own row count. Callers must not conflate the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
}

impl ProductPage {
    /// Number of products actually returned; may be less than `limit` at the
    /// end of the catalog, never more.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
