use thiserror::Error;

use crate::{
    db_types::{NewOrder, Order, OrderDetails, OrderStatusType},
    traits::{CatalogApiError, PaymentGatewayError},
};

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order not found")]
    OrderNotFound,
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Payment method nonce is required")]
    MissingNonce,
    #[error("Cart contains unknown product {0}")]
    UnknownProduct(i64),
    #[error("Cart total is too large")]
    TotalTooLarge,
    #[error("Payment failed. {0}")]
    PaymentFailed(String),
    #[error("Payment gateway error. {0}")]
    GatewayError(#[from] PaymentGatewayError),
    #[error("Catalog error. {0}")]
    CatalogError(#[from] CatalogApiError),
}

impl From<sqlx::Error> for OrderFlowError {
    fn from(e: sqlx::Error) -> Self {
        OrderFlowError::DatabaseError(e.to_string())
    }
}

/// Persistence for completed orders.
///
/// Orders are written once, after the payment gateway accepted the sale, and afterwards only their status changes.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Stores the order and its product list in a single atomic transaction. The status is always
    /// [`OrderStatusType::NotProcess`].
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderFlowError>;

    async fn fetch_order(&self, order_id: i64) -> Result<Option<Order>, OrderFlowError>;

    /// All orders placed by the buyer, with products and buyer expanded.
    async fn fetch_orders_for_buyer(&self, buyer_id: i64) -> Result<Vec<OrderDetails>, OrderFlowError>;

    /// Every order in the store, newest first, with products and buyer expanded.
    async fn fetch_all_orders(&self) -> Result<Vec<OrderDetails>, OrderFlowError>;

    /// Sets the fulfilment status of an order. Returns `None` if the order does not exist.
    async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatusType,
    ) -> Result<Option<Order>, OrderFlowError>;
}
