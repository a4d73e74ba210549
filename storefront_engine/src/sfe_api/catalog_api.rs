//! Categories, products and the storefront browsing queries.
use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Category, NewProduct, Price, Product, ProductPhoto},
    helpers::slugify,
    sfe_api::catalog_objects::{
        ProductInput,
        FRONT_PAGE_PRODUCTS,
        MAX_PHOTO_SIZE,
        MAX_PRODUCT_PRICE,
        MAX_RELATED_PRODUCTS,
        PRODUCTS_PER_PAGE,
    },
    traits::{CatalogApiError, CatalogManagement, ProductFilter, ProductPage},
};

pub struct CatalogApi<B> {
    db: B,
}

impl<B: Debug> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi ({:?})", self.db)
    }
}

fn invalid(message: &str) -> CatalogApiError {
    CatalogApiError::ValidationError(message.to_string())
}

/// Turns a category or product name into its (name, slug) pair, rejecting names that produce an empty slug.
fn name_and_slug(name: &str, missing: &str) -> Result<(String, String), CatalogApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid(missing));
    }
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(invalid("Name must contain at least one letter or digit"));
    }
    Ok((name.to_string(), slug))
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    //------------------------------------------   Categories   ------------------------------------------------

    pub async fn categories(&self) -> Result<Vec<Category>, CatalogApiError> {
        self.db.fetch_categories().await
    }

    pub async fn category_by_slug(&self, slug: &str) -> Result<Category, CatalogApiError> {
        self.db.fetch_category_by_slug(slug).await?.ok_or(CatalogApiError::CategoryNotFound)
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, CatalogApiError> {
        let (name, slug) = name_and_slug(name, "Name is required")?;
        if self.db.fetch_category_by_name(&name).await?.is_some() {
            return Err(CatalogApiError::CategoryAlreadyExists);
        }
        let category = self.db.insert_category(&name, &slug).await?;
        info!("🛍️ Category #{} '{}' created", category.id, category.name);
        Ok(category)
    }

    pub async fn update_category(&self, id: i64, name: &str) -> Result<Category, CatalogApiError> {
        let (name, slug) = name_and_slug(name, "Name is required")?;
        let category = self.db.update_category(id, &name, &slug).await?.ok_or(CatalogApiError::CategoryNotFound)?;
        debug!("🛍️ Category #{id} renamed to '{name}'");
        Ok(category)
    }

    pub async fn delete_category(&self, id: i64) -> Result<Category, CatalogApiError> {
        let category = self.db.delete_category(id).await?.ok_or(CatalogApiError::CategoryNotFound)?;
        info!("🛍️ Category #{id} '{}' deleted", category.name);
        Ok(category)
    }

    //------------------------------------------    Products    ------------------------------------------------

    /// Checks a product form, in the same order the admin form presents its fields, and resolves it into a
    /// [`NewProduct`].
    async fn validate_product(&self, input: ProductInput) -> Result<NewProduct, CatalogApiError> {
        let name = input.name.unwrap_or_default();
        if name.trim().is_empty() {
            return Err(invalid("Name is Required"));
        }
        let description = input.description.unwrap_or_default();
        if description.trim().is_empty() {
            return Err(invalid("Description is Required"));
        }
        let price = input.price.ok_or_else(|| invalid("Price is Required"))?;
        if price.cents() > MAX_PRODUCT_PRICE {
            return Err(invalid("Price is too large"));
        }
        let category_id = input.category_id.ok_or_else(|| invalid("Category is Required"))?;
        let quantity = input.quantity.ok_or_else(|| invalid("Quantity is Required"))?;
        if quantity < 0 {
            return Err(invalid("Quantity cannot be negative"));
        }
        if let Some(photo) = &input.photo {
            if photo.data.len() > MAX_PHOTO_SIZE {
                return Err(invalid("photo is Required and should be less then 1mb"));
            }
        }
        let (name, slug) = name_and_slug(&name, "Name is Required")?;
        if self.db.fetch_category_by_id(category_id).await?.is_none() {
            return Err(CatalogApiError::UnknownCategory(category_id));
        }
        Ok(NewProduct {
            name,
            slug,
            description: description.trim().to_string(),
            price,
            category_id,
            quantity,
            shipping: input.shipping.unwrap_or(false),
            photo: input.photo,
        })
    }

    pub async fn create_product(&self, input: ProductInput) -> Result<Product, CatalogApiError> {
        let product = self.validate_product(input).await?;
        let product = self.db.insert_product(product).await?;
        info!("🛍️ Product #{} '{}' created", product.id, product.name);
        Ok(product)
    }

    pub async fn update_product(&self, id: i64, input: ProductInput) -> Result<Product, CatalogApiError> {
        let product = self.validate_product(input).await?;
        let product = self.db.update_product(id, product).await?.ok_or(CatalogApiError::ProductNotFound)?;
        debug!("🛍️ Product #{id} updated");
        Ok(product)
    }

    pub async fn delete_product(&self, id: i64) -> Result<Product, CatalogApiError> {
        let product = self.db.delete_product(id).await?.ok_or(CatalogApiError::ProductNotFound)?;
        info!("🛍️ Product #{id} '{}' deleted", product.name);
        Ok(product)
    }

    pub async fn product_by_slug(&self, slug: &str) -> Result<Product, CatalogApiError> {
        self.db.fetch_product_by_slug(slug).await?.ok_or(CatalogApiError::ProductNotFound)
    }

    pub async fn product_photo(&self, id: i64) -> Result<ProductPhoto, CatalogApiError> {
        self.db.fetch_product_photo(id).await?.ok_or(CatalogApiError::ProductNotFound)
    }

    /// The newest products, for the landing page.
    pub async fn latest_products(&self) -> Result<Vec<Product>, CatalogApiError> {
        self.db.fetch_products(ProductPage::first(FRONT_PAGE_PRODUCTS)).await
    }

    pub async fn product_count(&self) -> Result<i64, CatalogApiError> {
        self.db.count_products().await
    }

    /// One page of the catalogue, newest first. Pages are numbered from 1.
    pub async fn product_page(&self, page: i64) -> Result<Vec<Product>, CatalogApiError> {
        self.db.fetch_products(ProductPage::numbered(page, PRODUCTS_PER_PAGE)).await
    }

    /// Filters by category and, if both bounds are given, by an inclusive price range. The bounds may be supplied in
    /// either order.
    pub async fn filter_products(
        &self,
        category_ids: Vec<i64>,
        price_range: Option<(Price, Price)>,
    ) -> Result<Vec<Product>, CatalogApiError> {
        let mut filter = ProductFilter::default().with_categories(category_ids);
        if let Some((a, b)) = price_range {
            filter = filter.with_price_range(a.min(b), a.max(b));
        }
        self.db.filter_products(filter).await
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<Product>, CatalogApiError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(vec![]);
        }
        self.db.search_products(keyword).await
    }

    pub async fn related_products(&self, product_id: i64, category_id: i64) -> Result<Vec<Product>, CatalogApiError> {
        self.db.related_products(product_id, category_id, MAX_RELATED_PRODUCTS).await
    }

    /// The category with the given slug and all of its products.
    pub async fn products_for_category(&self, slug: &str) -> Result<(Category, Vec<Product>), CatalogApiError> {
        let category = self.category_by_slug(slug).await?;
        let products = self.db.products_in_category(category.id).await?;
        Ok((category, products))
    }
}
