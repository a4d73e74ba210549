use log::*;
use sqlx::SqliteConnection;

use crate::{db_types::Category, traits::CatalogApiError};

fn map_unique_violation(e: sqlx::Error) -> CatalogApiError {
    match e {
        sqlx::Error::Database(de) if de.is_unique_violation() => CatalogApiError::CategoryAlreadyExists,
        e => CatalogApiError::from(e),
    }
}

pub async fn fetch_categories(conn: &mut SqliteConnection) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM categories ORDER BY name").fetch_all(conn).await
}

pub async fn fetch_category_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM categories WHERE id = $1").bind(id).fetch_optional(conn).await
}

pub async fn fetch_category_by_slug(slug: &str, conn: &mut SqliteConnection) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM categories WHERE slug = $1").bind(slug).fetch_optional(conn).await
}

pub async fn fetch_category_by_name(name: &str, conn: &mut SqliteConnection) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM categories WHERE name = $1").bind(name).fetch_optional(conn).await
}

pub async fn insert_category(name: &str, slug: &str, conn: &mut SqliteConnection) -> Result<Category, CatalogApiError> {
    let category: Category = sqlx::query_as("INSERT INTO categories (name, slug) VALUES ($1, $2) RETURNING *")
        .bind(name)
        .bind(slug)
        .fetch_one(conn)
        .await
        .map_err(map_unique_violation)?;
    debug!("🗃️ Category #{} '{}' created", category.id, category.name);
    Ok(category)
}

pub async fn update_category(
    id: i64,
    name: &str,
    slug: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Category>, CatalogApiError> {
    let category = sqlx::query_as("UPDATE categories SET name = $1, slug = $2 WHERE id = $3 RETURNING *")
        .bind(name)
        .bind(slug)
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(map_unique_violation)?;
    Ok(category)
}

pub async fn count_products_in_category(id: i64, conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM products WHERE category_id = $1").bind(id).fetch_one(conn).await?;
    Ok(count.0)
}

pub async fn delete_category(id: i64, conn: &mut SqliteConnection) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as("DELETE FROM categories WHERE id = $1 RETURNING *").bind(id).fetch_optional(conn).await
}
