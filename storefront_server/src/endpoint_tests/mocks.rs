use mockall::mock;
use storefront_engine::{
    db_types::{
        Category,
        NewOrder,
        NewProduct,
        NewUserAccount,
        Order,
        OrderDetails,
        OrderStatusType,
        Price,
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
        ClientToken,
        OrderFlowError,
        OrderManagement,
        PaymentGateway,
        PaymentGatewayError,
        ProductFilter,
        ProductPage,
        SaleResult,
    },
};

mock! {
    pub Store {}
    impl AuthManagement for Store {
        async fn create_account(&self, account: NewUserAccount) -> Result<UserAccount, AuthApiError>;
        async fn fetch_account_by_id(&self, account_id: i64) -> Result<Option<UserAccount>, AuthApiError>;
        async fn fetch_account_by_email(&self, email: &str) -> Result<Option<UserAccount>, AuthApiError>;
        async fn update_password(&self, account_id: i64, password_hash: &str) -> Result<(), AuthApiError>;
        async fn update_profile(&self, account_id: i64, update: ProfileUpdate) -> Result<Option<UserAccount>, AuthApiError>;
    }
    impl AccountManagement for Store {
        async fn fetch_all_accounts(&self) -> Result<Vec<UserAccount>, AccountApiError>;
        async fn fetch_user_account(&self, account_id: i64) -> Result<Option<UserAccount>, AccountApiError>;
    }
    impl CatalogManagement for Store {
        async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogApiError>;
        async fn fetch_category_by_id(&self, id: i64) -> Result<Option<Category>, CatalogApiError>;
        async fn fetch_category_by_slug(&self, slug: &str) -> Result<Option<Category>, CatalogApiError>;
        async fn fetch_category_by_name(&self, name: &str) -> Result<Option<Category>, CatalogApiError>;
        async fn insert_category(&self, name: &str, slug: &str) -> Result<Category, CatalogApiError>;
        async fn update_category(&self, id: i64, name: &str, slug: &str) -> Result<Option<Category>, CatalogApiError>;
        async fn delete_category(&self, id: i64) -> Result<Option<Category>, CatalogApiError>;
        async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogApiError>;
        async fn update_product(&self, id: i64, product: NewProduct) -> Result<Option<Product>, CatalogApiError>;
        async fn delete_product(&self, id: i64) -> Result<Option<Product>, CatalogApiError>;
        async fn fetch_product_by_id(&self, id: i64) -> Result<Option<Product>, CatalogApiError>;
        async fn fetch_product_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogApiError>;
        async fn fetch_products_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>, CatalogApiError>;
        async fn fetch_product_photo(&self, id: i64) -> Result<Option<ProductPhoto>, CatalogApiError>;
        async fn fetch_products(&self, page: ProductPage) -> Result<Vec<Product>, CatalogApiError>;
        async fn count_products(&self) -> Result<i64, CatalogApiError>;
        async fn filter_products(&self, filter: ProductFilter) -> Result<Vec<Product>, CatalogApiError>;
        async fn search_products(&self, keyword: &str) -> Result<Vec<Product>, CatalogApiError>;
        async fn related_products(&self, product_id: i64, category_id: i64, limit: i64) -> Result<Vec<Product>, CatalogApiError>;
        async fn products_in_category(&self, category_id: i64) -> Result<Vec<Product>, CatalogApiError>;
    }
    impl OrderManagement for Store {
        async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderFlowError>;
        async fn fetch_order(&self, order_id: i64) -> Result<Option<Order>, OrderFlowError>;
        async fn fetch_orders_for_buyer(&self, buyer_id: i64) -> Result<Vec<OrderDetails>, OrderFlowError>;
        async fn fetch_all_orders(&self) -> Result<Vec<OrderDetails>, OrderFlowError>;
        async fn update_order_status(&self, order_id: i64, status: OrderStatusType) -> Result<Option<Order>, OrderFlowError>;
    }
}

mock! {
    pub Gateway {}
    impl PaymentGateway for Gateway {
        async fn generate_client_token(&self) -> Result<ClientToken, PaymentGatewayError>;
        async fn sale(&self, amount: Price, nonce: &str) -> Result<SaleResult, PaymentGatewayError>;
    }
}
