use serde::Deserialize;
use shelf_core::{Product, ProductPage};

/// Wire envelope of the paginated listing endpoint:
/// `{ "products": [...], "total": n, "skip": n, "limit": n }`.
#[derive(Debug, Deserialize)]
pub struct ProductsEnvelope {
    pub products: Vec<Product>,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
}

impl From<ProductsEnvelope> for ProductPage {
    fn from(envelope: ProductsEnvelope) -> Self {
        Self {
            products: envelope.products,
            total: envelope.total,
            skip: envelope.skip,
            limit: envelope.limit,
        }
    }
}
