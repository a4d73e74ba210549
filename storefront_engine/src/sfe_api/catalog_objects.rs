use crate::db_types::{Price, ProductPhoto};

/// Largest product photo accepted, in bytes.
pub const MAX_PHOTO_SIZE: usize = 1_000_000;
/// Highest price a single product may carry, in cents ($10 million).
pub const MAX_PRODUCT_PRICE: i64 = 1_000_000_000;
/// Number of products on the storefront's landing listing.
pub const FRONT_PAGE_PRODUCTS: i64 = 12;
/// Page size for the paginated product listing.
pub const PRODUCTS_PER_PAGE: i64 = 6;
/// Maximum number of "you might also like" products.
pub const MAX_RELATED_PRODUCTS: i64 = 3;

/// Product form data, as submitted by an administrator. Required fields are optional here so that a missing field
/// can be reported by name.
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub category_id: Option<i64>,
    pub quantity: Option<i64>,
    pub shipping: Option<bool>,
    pub photo: Option<ProductPhoto>,
}
