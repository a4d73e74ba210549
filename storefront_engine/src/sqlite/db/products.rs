use log::*;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use super::escape_like;
use crate::{
    db_types::{NewProduct, Product, ProductPhoto},
    traits::{CatalogApiError, ProductFilter, ProductPage},
};

/// Every product column except the photo, which is only loaded by [`fetch_product_photo`].
const PRODUCT_COLUMNS: &str = "id, name, slug, description, price, category_id, quantity, shipping, created_at, updated_at";
const NEWEST_FIRST: &str = " ORDER BY created_at DESC, id DESC";

fn map_write_error(e: sqlx::Error, category_id: i64) -> CatalogApiError {
    match e {
        sqlx::Error::Database(de) if de.is_unique_violation() => CatalogApiError::ProductAlreadyExists,
        sqlx::Error::Database(de) if de.is_foreign_key_violation() => CatalogApiError::UnknownCategory(category_id),
        e => CatalogApiError::from(e),
    }
}

pub async fn insert_product(product: NewProduct, conn: &mut SqliteConnection) -> Result<Product, CatalogApiError> {
    let category_id = product.category_id;
    let (photo, content_type) = match product.photo {
        Some(p) => (Some(p.data), Some(p.content_type)),
        None => (None, None),
    };
    let q = format!(
        r#"
            INSERT INTO products (name, slug, description, price, category_id, quantity, shipping, photo, photo_content_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PRODUCT_COLUMNS};
        "#
    );
    let product: Product = sqlx::query_as(&q)
        .bind(product.name)
        .bind(product.slug)
        .bind(product.description)
        .bind(product.price)
        .bind(product.category_id)
        .bind(product.quantity)
        .bind(product.shipping)
        .bind(photo)
        .bind(content_type)
        .fetch_one(conn)
        .await
        .map_err(|e| map_write_error(e, category_id))?;
    debug!("🗃️ Product #{} '{}' created", product.id, product.name);
    Ok(product)
}

pub async fn update_product(
    id: i64,
    product: NewProduct,
    conn: &mut SqliteConnection,
) -> Result<Option<Product>, CatalogApiError> {
    let category_id = product.category_id;
    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE products SET updated_at = CURRENT_TIMESTAMP");
    builder.push(", name = ").push_bind(product.name);
    builder.push(", slug = ").push_bind(product.slug);
    builder.push(", description = ").push_bind(product.description);
    builder.push(", price = ").push_bind(product.price);
    builder.push(", category_id = ").push_bind(product.category_id);
    builder.push(", quantity = ").push_bind(product.quantity);
    builder.push(", shipping = ").push_bind(product.shipping);
    if let Some(photo) = product.photo {
        builder.push(", photo = ").push_bind(photo.data);
        builder.push(", photo_content_type = ").push_bind(photo.content_type);
    }
    builder.push(" WHERE id = ").push_bind(id);
    builder.push(" RETURNING ").push(PRODUCT_COLUMNS);
    let product = builder
        .build_query_as::<Product>()
        .fetch_optional(conn)
        .await
        .map_err(|e| map_write_error(e, category_id))?;
    Ok(product)
}

pub async fn delete_product(id: i64, conn: &mut SqliteConnection) -> Result<Option<Product>, sqlx::Error> {
    let q = format!("DELETE FROM products WHERE id = $1 RETURNING {PRODUCT_COLUMNS}");
    sqlx::query_as(&q).bind(id).fetch_optional(conn).await
}

pub async fn fetch_product_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Product>, sqlx::Error> {
    let q = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
    sqlx::query_as(&q).bind(id).fetch_optional(conn).await
}

pub async fn fetch_product_by_slug(slug: &str, conn: &mut SqliteConnection) -> Result<Option<Product>, sqlx::Error> {
    let q = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE slug = $1");
    sqlx::query_as(&q).bind(slug).fetch_optional(conn).await
}

pub async fn fetch_products_by_ids(ids: &[i64], conn: &mut SqliteConnection) -> Result<Vec<Product>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id IN ("));
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
    builder.build_query_as::<Product>().fetch_all(conn).await
}

pub async fn fetch_product_photo(id: i64, conn: &mut SqliteConnection) -> Result<Option<ProductPhoto>, sqlx::Error> {
    sqlx::query_as(
        r#"SELECT photo AS data, COALESCE(photo_content_type, 'application/octet-stream') AS content_type
           FROM products WHERE id = $1 AND photo IS NOT NULL"#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
}

pub async fn fetch_products(page: ProductPage, conn: &mut SqliteConnection) -> Result<Vec<Product>, sqlx::Error> {
    let q = format!("SELECT {PRODUCT_COLUMNS} FROM products{NEWEST_FIRST} LIMIT $1 OFFSET $2");
    sqlx::query_as(&q).bind(page.limit).bind(page.offset).fetch_all(conn).await
}

pub async fn count_products(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products").fetch_one(conn).await?;
    Ok(count.0)
}

/// Fetches products according to the criteria in the `ProductFilter`. An empty filter returns every product.
pub async fn filter_products(filter: ProductFilter, conn: &mut SqliteConnection) -> Result<Vec<Product>, sqlx::Error> {
    let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
    if !filter.is_empty() {
        builder.push(" WHERE ");
    }
    let mut where_clause = builder.separated(" AND ");
    if !filter.category_ids.is_empty() {
        where_clause.push("category_id IN (");
        let ids = filter.category_ids.iter().map(|id| id.to_string()).collect::<Vec<String>>().join(",");
        where_clause.push_unseparated(ids);
        where_clause.push_unseparated(")");
    }
    if let Some(range) = filter.price_range {
        where_clause.push("price >= ");
        where_clause.push_bind_unseparated(range.min);
        where_clause.push("price <= ");
        where_clause.push_bind_unseparated(range.max);
    }
    builder.push(NEWEST_FIRST);
    trace!("🗃️ Executing query: {}", builder.sql());
    builder.build_query_as::<Product>().fetch_all(conn).await
}

/// Case-insensitive (for ASCII) substring search over product names and descriptions.
pub async fn search_products(keyword: &str, conn: &mut SqliteConnection) -> Result<Vec<Product>, sqlx::Error> {
    let pattern = format!("%{}%", escape_like(keyword));
    let q = format!(
        r#"SELECT {PRODUCT_COLUMNS} FROM products
           WHERE name LIKE $1 ESCAPE '\' OR description LIKE $1 ESCAPE '\'{NEWEST_FIRST}"#
    );
    sqlx::query_as(&q).bind(pattern).fetch_all(conn).await
}

pub async fn related_products(
    product_id: i64,
    category_id: i64,
    limit: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Product>, sqlx::Error> {
    let q = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE category_id = $1 AND id != $2{NEWEST_FIRST} LIMIT $3");
    sqlx::query_as(&q).bind(category_id).bind(product_id).bind(limit).fetch_all(conn).await
}

pub async fn products_in_category(category_id: i64, conn: &mut SqliteConnection) -> Result<Vec<Product>, sqlx::Error> {
    let q = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE category_id = $1{NEWEST_FIRST}");
    sqlx::query_as(&q).bind(category_id).fetch_all(conn).await
}
