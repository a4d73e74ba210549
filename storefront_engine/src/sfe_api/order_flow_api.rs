use std::{collections::HashMap, fmt::Debug};

use log::*;
use serde_json::json;

use crate::{
    db_types::{NewOrder, Order, OrderDetails, OrderStatusType, Price},
    traits::{CatalogManagement, OrderFlowError, OrderManagement, PaymentGateway},
};

/// `OrderFlowApi` runs checkout and manages orders after the fact.
///
/// Checkout is a two-step, non-atomic process: the sale is submitted to the payment gateway first, and the order is
/// written only if the gateway reports success. If the order insert fails after a successful sale, the payment has
/// been captured without an order; this is logged as an error with the gateway's transaction details so it can be
/// reconciled by hand.
pub struct OrderFlowApi<B> {
    db: B,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> OrderFlowApi<B>
where B: OrderManagement + CatalogManagement
{
    /// Computes the cart total from current catalogue prices. Every cart entry counts once, so a product that appears
    /// twice is charged twice.
    pub async fn cart_total(&self, cart: &[i64]) -> Result<Price, OrderFlowError> {
        if cart.is_empty() {
            return Err(OrderFlowError::EmptyCart);
        }
        let mut ids = cart.to_vec();
        ids.sort_unstable();
        ids.dedup();
        let prices = self
            .db
            .fetch_products_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p.price))
            .collect::<HashMap<i64, Price>>();
        cart.iter().try_fold(Price::default(), |total, id| {
            let price = prices.get(id).copied().ok_or(OrderFlowError::UnknownProduct(*id))?;
            total.checked_add(price).ok_or(OrderFlowError::TotalTooLarge)
        })
    }

    /// Charges the buyer for the cart and, if the gateway accepts the sale, records the order.
    ///
    /// Validation failures (missing nonce, empty cart, unknown products) are raised before the gateway is contacted.
    /// A declined sale yields [`OrderFlowError::PaymentFailed`] and no order is written.
    pub async fn checkout<G: PaymentGateway>(
        &self,
        gateway: &G,
        buyer_id: i64,
        nonce: &str,
        cart: &[i64],
    ) -> Result<Order, OrderFlowError> {
        if nonce.trim().is_empty() {
            return Err(OrderFlowError::MissingNonce);
        }
        let total = self.cart_total(cart).await?;
        debug!("🛒️ Submitting sale of {total} for buyer #{buyer_id} ({} items)", cart.len());
        let sale = gateway.sale(total, nonce).await?;
        if !sale.success {
            let message = sale.message.unwrap_or_else(|| "The sale was declined".to_string());
            warn!("🛒️ Sale of {total} for buyer #{buyer_id} failed. {message}");
            return Err(OrderFlowError::PaymentFailed(message));
        }
        let payment = json!({ "success": true, "transaction": sale.transaction });
        let order = NewOrder::new(buyer_id, cart.to_vec(), payment.clone());
        match self.db.insert_order(order).await {
            Ok(order) => {
                info!("🛒️ Order #{} placed by buyer #{buyer_id} for {total}", order.id);
                Ok(order)
            },
            Err(e) => {
                error!(
                    "🛒️ Payment was captured for buyer #{buyer_id} but the order could not be saved. Reconcile \
                     manually. Payment: {payment}. Error: {e}"
                );
                Err(e)
            },
        }
    }

    pub async fn order(&self, order_id: i64) -> Result<Option<Order>, OrderFlowError> {
        self.db.fetch_order(order_id).await
    }

    pub async fn orders_for_buyer(&self, buyer_id: i64) -> Result<Vec<OrderDetails>, OrderFlowError> {
        self.db.fetch_orders_for_buyer(buyer_id).await
    }

    pub async fn all_orders(&self) -> Result<Vec<OrderDetails>, OrderFlowError> {
        self.db.fetch_all_orders().await
    }

    pub async fn update_order_status(&self, order_id: i64, status: OrderStatusType) -> Result<Order, OrderFlowError> {
        let order = self.db.update_order_status(order_id, status).await?.ok_or(OrderFlowError::OrderNotFound)?;
        info!("🛒️ Order #{order_id} is now '{status}'");
        Ok(order)
    }
}
