//! Database operations for the cached `products` table.
//!
//! The store owns the on-disk representation of cached products. All
//! mutation goes through [`ProductStore::write_page`] and
//! [`ProductStore::clear`], both of which run inside a transaction so a
//! concurrent reader never observes a half-written page.

use std::str::FromStr;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use shelf_core::{Product, ProductPage};

use crate::StoreError;

const SELECT_COLUMNS: &str = "id, title, description, category, price, discount_percentage, \
     rating, stock, tags, brand, sku, thumbnail, images";

/// A row from the `products` table.
///
/// Decimal columns are TEXT (exact round-trip; SQLite has no decimal type)
/// and `tags`/`images` are JSON arrays. [`ProductRow::into_product`] parses
/// them back, surfacing [`StoreError::Corrupt`] when a column was mangled.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub discount_percentage: String,
    pub rating: f64,
    pub stock: i64,
    pub tags: String,
    pub brand: Option<String>,
    pub sku: String,
    pub thumbnail: String,
    pub images: String,
}

impl ProductRow {
    /// Parses the row back into a domain [`Product`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if a decimal or JSON column fails to
    /// parse.
    pub fn into_product(self) -> Result<Product, StoreError> {
        let id = self.id;
        let corrupt = |field: &'static str, detail: String| StoreError::Corrupt {
            product_id: id,
            field,
            detail,
        };

        let price = Decimal::from_str(&self.price)
            .map_err(|e| corrupt("price", e.to_string()))?;
        let discount_percentage = Decimal::from_str(&self.discount_percentage)
            .map_err(|e| corrupt("discount_percentage", e.to_string()))?;
        let tags: Vec<String> =
            serde_json::from_str(&self.tags).map_err(|e| corrupt("tags", e.to_string()))?;
        let images: Vec<String> =
            serde_json::from_str(&self.images).map_err(|e| corrupt("images", e.to_string()))?;

        Ok(Product {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            price,
            discount_percentage,
            rating: self.rating,
            stock: self.stock,
            tags,
            brand: self.brand,
            sku: self.sku,
            thumbnail: self.thumbnail,
            images,
        })
    }
}

/// On-device store for the cached product listing.
#[derive(Debug, Clone)]
pub struct ProductStore {
    pool: SqlitePool,
}

impl ProductStore {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Writes one fetched page into the cache.
    ///
    /// When `clear_first` is set, all previously stored products are removed
    /// before the new rows are inserted (a listing refresh replaces the
    /// cache wholesale). Otherwise rows are upserted by `id`, last write
    /// wins. Every row gets the next write ordinal, so an upserted product
    /// moves to the end of the cached browsing order.
    ///
    /// The whole write is one transaction: readers see either the cache
    /// state before the page or after it, never in between.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlx`] if a statement fails, or
    /// [`StoreError::Encode`] if `tags`/`images` cannot be encoded as JSON.
    pub async fn write_page(&self, page: &ProductPage, clear_first: bool) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        if clear_first {
            sqlx::query("DELETE FROM products").execute(&mut *tx).await?;
        }

        let mut seq: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(cached_seq), 0) FROM products")
                .fetch_one(&mut *tx)
                .await?;
        let now = Utc::now();

        for product in &page.products {
            seq += 1;
            let tags = serde_json::to_string(&product.tags).map_err(|e| StoreError::Encode {
                product_id: product.id,
                field: "tags",
                source: e,
            })?;
            let images = serde_json::to_string(&product.images).map_err(|e| StoreError::Encode {
                product_id: product.id,
                field: "images",
                source: e,
            })?;

            sqlx::query(
                "INSERT INTO products \
                     (id, title, description, category, price, discount_percentage, \
                      rating, stock, tags, brand, sku, thumbnail, images, cached_seq, cached_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
                 ON CONFLICT (id) DO UPDATE SET \
                     title               = excluded.title, \
                     description         = excluded.description, \
                     category            = excluded.category, \
                     price               = excluded.price, \
                     discount_percentage = excluded.discount_percentage, \
                     rating              = excluded.rating, \
                     stock               = excluded.stock, \
                     tags                = excluded.tags, \
                     brand               = excluded.brand, \
                     sku                 = excluded.sku, \
                     thumbnail           = excluded.thumbnail, \
                     images              = excluded.images, \
                     cached_seq          = excluded.cached_seq, \
                     cached_at           = excluded.cached_at",
            )
            .bind(product.id)
            .bind(&product.title)
            .bind(&product.description)
            .bind(&product.category)
            .bind(product.price.to_string())
            .bind(product.discount_percentage.to_string())
            .bind(product.rating)
            .bind(product.stock)
            .bind(tags)
            .bind(&product.brand)
            .bind(&product.sku)
            .bind(&product.thumbnail)
            .bind(images)
            .bind(seq)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Reads the `(skip, limit)` window from the cache.
    ///
    /// Rows come back ordered by write ordinal, i.e. in the order pages were
    /// cached, so the `(0, limit)` window is unaffected by later-page
    /// appends. `total` in the returned page is the *local* row count, not
    /// the remote catalog size.
    ///
    /// Window and count are read in one transaction so they agree with each
    /// other.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlx`] if a query fails, or
    /// [`StoreError::Corrupt`] if a persisted row fails to parse.
    pub async fn read_page(&self, skip: i64, limit: i64) -> Result<ProductPage, StoreError> {
        let mut tx = self.pool.begin().await?;

        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM products ORDER BY cached_seq LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(skip)
        .fetch_all(&mut *tx)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        let products = rows
            .into_iter()
            .map(ProductRow::into_product)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProductPage {
            products,
            total,
            skip,
            limit,
        })
    }

    /// Removes all cached products.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlx`] if the delete fails.
    pub async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
