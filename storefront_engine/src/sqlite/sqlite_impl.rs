//! `SqliteDatabase` is a concrete implementation of a storefront backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the persistence traits defined in the
//! [`crate::traits`] module.
use std::fmt::Debug;

use log::*;
use sqlx::{migrate::MigrateError, SqlitePool};

use super::db::{accounts, categories, create_database_if_missing, new_pool, orders, products};
use crate::{
    db_types::{
        Category,
        NewOrder,
        NewProduct,
        NewUserAccount,
        Order,
        OrderDetails,
        OrderStatusType,
        Product,
        ProductPhoto,
        ProfileUpdate,
        UserAccount,
    },
    traits::{
        AccountApiError,
        AccountManagement,
        AuthApiError,
        AuthManagement,
        CatalogApiError,
        CatalogManagement,
        OrderFlowError,
        OrderManagement,
        ProductFilter,
        ProductPage,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl AuthManagement for SqliteDatabase {
    async fn create_account(&self, account: NewUserAccount) -> Result<UserAccount, AuthApiError> {
        let mut tx = self.pool.begin().await?;
        let account = accounts::insert_account(account, &mut tx).await?;
        tx.commit().await?;
        Ok(account)
    }

    async fn fetch_account_by_id(&self, account_id: i64) -> Result<Option<UserAccount>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        let account = accounts::fetch_account_by_id(account_id, &mut conn).await?;
        Ok(account)
    }

    async fn fetch_account_by_email(&self, email: &str) -> Result<Option<UserAccount>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        let account = accounts::fetch_account_by_email(email, &mut conn).await?;
        Ok(account)
    }

    async fn update_password(&self, account_id: i64, password_hash: &str) -> Result<(), AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        accounts::update_password(account_id, password_hash, &mut conn).await?;
        debug!("🗃️ Password updated for account #{account_id}");
        Ok(())
    }

    async fn update_profile(
        &self,
        account_id: i64,
        update: ProfileUpdate,
    ) -> Result<Option<UserAccount>, AuthApiError> {
        let mut tx = self.pool.begin().await?;
        let account = accounts::update_profile(account_id, update, &mut tx).await?;
        tx.commit().await?;
        Ok(account)
    }
}

impl AccountManagement for SqliteDatabase {
    async fn fetch_all_accounts(&self) -> Result<Vec<UserAccount>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let accounts = accounts::fetch_all_accounts(&mut conn).await?;
        Ok(accounts)
    }

    async fn fetch_user_account(&self, account_id: i64) -> Result<Option<UserAccount>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let account = accounts::fetch_account_by_id(account_id, &mut conn).await?;
        Ok(account)
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(categories::fetch_categories(&mut conn).await?)
    }

    async fn fetch_category_by_id(&self, id: i64) -> Result<Option<Category>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(categories::fetch_category_by_id(id, &mut conn).await?)
    }

    async fn fetch_category_by_slug(&self, slug: &str) -> Result<Option<Category>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(categories::fetch_category_by_slug(slug, &mut conn).await?)
    }

    async fn fetch_category_by_name(&self, name: &str) -> Result<Option<Category>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(categories::fetch_category_by_name(name, &mut conn).await?)
    }

    async fn insert_category(&self, name: &str, slug: &str) -> Result<Category, CatalogApiError> {
        let mut tx = self.pool.begin().await?;
        let category = categories::insert_category(name, slug, &mut tx).await?;
        tx.commit().await?;
        Ok(category)
    }

    async fn update_category(&self, id: i64, name: &str, slug: &str) -> Result<Option<Category>, CatalogApiError> {
        let mut tx = self.pool.begin().await?;
        let category = categories::update_category(id, name, slug, &mut tx).await?;
        tx.commit().await?;
        Ok(category)
    }

    /// Checks for remaining products and deletes the category in one transaction.
    async fn delete_category(&self, id: i64) -> Result<Option<Category>, CatalogApiError> {
        let mut tx = self.pool.begin().await?;
        let in_use = categories::count_products_in_category(id, &mut tx).await?;
        if in_use > 0 {
            debug!("🗃️ Category #{id} still has {in_use} products. Not deleting it.");
            return Err(CatalogApiError::CategoryInUse);
        }
        let deleted = categories::delete_category(id, &mut tx).await?;
        tx.commit().await?;
        Ok(deleted)
    }

    async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogApiError> {
        let mut tx = self.pool.begin().await?;
        let product = products::insert_product(product, &mut tx).await?;
        tx.commit().await?;
        Ok(product)
    }

    async fn update_product(&self, id: i64, product: NewProduct) -> Result<Option<Product>, CatalogApiError> {
        let mut tx = self.pool.begin().await?;
        let product = products::update_product(id, product, &mut tx).await?;
        tx.commit().await?;
        Ok(product)
    }

    async fn delete_product(&self, id: i64) -> Result<Option<Product>, CatalogApiError> {
        let mut tx = self.pool.begin().await?;
        let product = products::delete_product(id, &mut tx).await?;
        tx.commit().await?;
        Ok(product)
    }

    async fn fetch_product_by_id(&self, id: i64) -> Result<Option<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::fetch_product_by_id(id, &mut conn).await?)
    }

    async fn fetch_product_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::fetch_product_by_slug(slug, &mut conn).await?)
    }

    async fn fetch_products_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::fetch_products_by_ids(ids, &mut conn).await?)
    }

    async fn fetch_product_photo(&self, id: i64) -> Result<Option<ProductPhoto>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::fetch_product_photo(id, &mut conn).await?)
    }

    async fn fetch_products(&self, page: ProductPage) -> Result<Vec<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::fetch_products(page, &mut conn).await?)
    }

    async fn count_products(&self) -> Result<i64, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::count_products(&mut conn).await?)
    }

    async fn filter_products(&self, filter: ProductFilter) -> Result<Vec<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::filter_products(filter, &mut conn).await?)
    }

    async fn search_products(&self, keyword: &str) -> Result<Vec<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::search_products(keyword, &mut conn).await?)
    }

    async fn related_products(
        &self,
        product_id: i64,
        category_id: i64,
        limit: i64,
    ) -> Result<Vec<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::related_products(product_id, category_id, limit, &mut conn).await?)
    }

    async fn products_in_category(&self, category_id: i64) -> Result<Vec<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::products_in_category(category_id, &mut conn).await?)
    }
}

impl OrderManagement for SqliteDatabase {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderFlowError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::insert_order(order, &mut tx).await?;
        tx.commit().await?;
        Ok(order)
    }

    async fn fetch_order(&self, order_id: i64) -> Result<Option<Order>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_order(order_id, &mut conn).await?)
    }

    async fn fetch_orders_for_buyer(&self, buyer_id: i64) -> Result<Vec<OrderDetails>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_order_details(Some(buyer_id), &mut conn).await?)
    }

    async fn fetch_all_orders(&self) -> Result<Vec<OrderDetails>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_order_details(None, &mut conn).await?)
    }

    async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatusType,
    ) -> Result<Option<Order>, OrderFlowError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::update_order_status(order_id, status, &mut tx).await?;
        tx.commit().await?;
        Ok(order)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Creates the database file if needed, connects, and brings the schema up to date.
    pub async fn create_and_migrate(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        create_database_if_missing(url).await?;
        let db = Self::new_with_url(url, max_connections).await?;
        db.migrate().await.map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
        Ok(db)
    }

    /// Runs the embedded migrations against this database.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations are up to date");
        Ok(())
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
