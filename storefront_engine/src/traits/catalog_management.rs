use thiserror::Error;

use crate::{
    db_types::{Category, NewProduct, Product, ProductPhoto},
    traits::{ProductFilter, ProductPage},
};

#[derive(Debug, Clone, Error)]
pub enum CatalogApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("Category already exists")]
    CategoryAlreadyExists,
    #[error("Category not found")]
    CategoryNotFound,
    #[error("Category {0} does not exist")]
    UnknownCategory(i64),
    #[error("Category still has products assigned to it")]
    CategoryInUse,
    #[error("A product with this name already exists")]
    ProductAlreadyExists,
    #[error("Product not found")]
    ProductNotFound,
}

impl From<sqlx::Error> for CatalogApiError {
    fn from(e: sqlx::Error) -> Self {
        CatalogApiError::DatabaseError(e.to_string())
    }
}

/// Category and product storage, plus the read queries behind the storefront's browsing pages.
///
/// Listing queries return products newest first unless stated otherwise. Product photos are never loaded by the
/// listing queries; use [`CatalogManagement::fetch_product_photo`].
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogApiError>;
    async fn fetch_category_by_id(&self, id: i64) -> Result<Option<Category>, CatalogApiError>;
    async fn fetch_category_by_slug(&self, slug: &str) -> Result<Option<Category>, CatalogApiError>;
    async fn fetch_category_by_name(&self, name: &str) -> Result<Option<Category>, CatalogApiError>;
    /// Inserts a new category. Names are unique; a clash yields [`CatalogApiError::CategoryAlreadyExists`].
    async fn insert_category(&self, name: &str, slug: &str) -> Result<Category, CatalogApiError>;
    /// Renames a category. Returns `None` if no category has the given id.
    async fn update_category(&self, id: i64, name: &str, slug: &str) -> Result<Option<Category>, CatalogApiError>;
    /// Deletes a category, returning the deleted record, or `None` if it did not exist. Categories that still have
    /// products fail with [`CatalogApiError::CategoryInUse`].
    async fn delete_category(&self, id: i64) -> Result<Option<Category>, CatalogApiError>;

    async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogApiError>;
    /// Replaces every field of the product. The photo is only replaced if `product.photo` is `Some`.
    async fn update_product(&self, id: i64, product: NewProduct) -> Result<Option<Product>, CatalogApiError>;
    async fn delete_product(&self, id: i64) -> Result<Option<Product>, CatalogApiError>;
    async fn fetch_product_by_id(&self, id: i64) -> Result<Option<Product>, CatalogApiError>;
    async fn fetch_product_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogApiError>;
    /// Fetches the products with the given ids. Unknown ids are skipped; the result order is unspecified.
    async fn fetch_products_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>, CatalogApiError>;
    async fn fetch_product_photo(&self, id: i64) -> Result<Option<ProductPhoto>, CatalogApiError>;

    async fn fetch_products(&self, page: ProductPage) -> Result<Vec<Product>, CatalogApiError>;
    async fn count_products(&self) -> Result<i64, CatalogApiError>;
    async fn filter_products(&self, filter: ProductFilter) -> Result<Vec<Product>, CatalogApiError>;
    /// Case-insensitive substring match over product names and descriptions.
    async fn search_products(&self, keyword: &str) -> Result<Vec<Product>, CatalogApiError>;
    /// Other products in the same category, excluding `product_id`.
    async fn related_products(
        &self,
        product_id: i64,
        category_id: i64,
        limit: i64,
    ) -> Result<Vec<Product>, CatalogApiError>;
    async fn products_in_category(&self, category_id: i64) -> Result<Vec<Product>, CatalogApiError>;
}
