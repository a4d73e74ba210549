use chrono::{DateTime, Utc};
use log::*;
use serde_json::Value;
use sqlx::{types::Json, FromRow, QueryBuilder, Sqlite, SqliteConnection};

use crate::db_types::{BuyerSummary, NewOrder, Order, OrderDetails, OrderStatusType, ProductSummary};

const ORDER_COLUMNS: &str = "id, buyer_id, payment, status, created_at, updated_at";

/// A row of the `orders` table. The product list lives in `order_products` and is attached separately.
#[derive(Debug, Clone, FromRow)]
struct OrderRow {
    id: i64,
    buyer_id: i64,
    payment: Json<Value>,
    status: OrderStatusType,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, products: Vec<i64>) -> Order {
        Order {
            id: self.id,
            buyer_id: self.buyer_id,
            products,
            payment: self.payment.0,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn into_details(self, products: Vec<ProductSummary>, buyer: BuyerSummary) -> OrderDetails {
        OrderDetails {
            id: self.id,
            products,
            payment: self.payment.0,
            buyer,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Inserts a new order and its product rows. This is not atomic on its own: call it inside a transaction and pass
/// `&mut *tx` as the connection argument.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, sqlx::Error> {
    let q = format!("INSERT INTO orders (buyer_id, payment) VALUES ($1, $2) RETURNING {ORDER_COLUMNS}");
    let row: OrderRow = sqlx::query_as(&q).bind(order.buyer_id).bind(Json(&order.payment)).fetch_one(&mut *conn).await?;
    if !order.products.is_empty() {
        let mut builder = QueryBuilder::<Sqlite>::new("INSERT INTO order_products (order_id, position, product_id) ");
        builder.push_values(order.products.iter().enumerate(), |mut b, (position, product_id)| {
            b.push_bind(row.id).push_bind(position as i64).push_bind(*product_id);
        });
        builder.build().execute(&mut *conn).await?;
    }
    debug!("📝️ Order #{} saved for buyer #{} with {} products", row.id, row.buyer_id, order.products.len());
    Ok(row.into_order(order.products))
}

async fn product_ids_for_order(order_id: i64, conn: &mut SqliteConnection) -> Result<Vec<i64>, sqlx::Error> {
    let ids: Vec<(i64,)> =
        sqlx::query_as("SELECT product_id FROM order_products WHERE order_id = $1 ORDER BY position")
            .bind(order_id)
            .fetch_all(conn)
            .await?;
    Ok(ids.into_iter().map(|(id,)| id).collect())
}

/// Products in cart order. Products that have since been deleted from the catalogue are omitted.
async fn product_summaries_for_order(
    order_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<ProductSummary>, sqlx::Error> {
    sqlx::query_as(
        r#"SELECT p.id, p.name, p.slug, p.description, p.price
           FROM order_products op JOIN products p ON p.id = op.product_id
           WHERE op.order_id = $1
           ORDER BY op.position"#,
    )
    .bind(order_id)
    .fetch_all(conn)
    .await
}

async fn expand(row: OrderRow, conn: &mut SqliteConnection) -> Result<OrderDetails, sqlx::Error> {
    let products = product_summaries_for_order(row.id, &mut *conn).await?;
    let buyer: BuyerSummary =
        sqlx::query_as("SELECT id, name FROM users WHERE id = $1").bind(row.buyer_id).fetch_one(&mut *conn).await?;
    Ok(row.into_details(products, buyer))
}

pub async fn fetch_order(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let q = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
    let row: Option<OrderRow> = sqlx::query_as(&q).bind(id).fetch_optional(&mut *conn).await?;
    match row {
        Some(row) => {
            let products = product_ids_for_order(row.id, conn).await?;
            Ok(Some(row.into_order(products)))
        },
        None => Ok(None),
    }
}

/// Fetches orders, newest first, optionally restricted to a single buyer, with products and buyer expanded.
pub async fn fetch_order_details(
    buyer_id: Option<i64>,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderDetails>, sqlx::Error> {
    let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT {ORDER_COLUMNS} FROM orders"));
    if let Some(id) = buyer_id {
        builder.push(" WHERE buyer_id = ").push_bind(id);
    }
    builder.push(" ORDER BY created_at DESC, id DESC");
    let rows = builder.build_query_as::<OrderRow>().fetch_all(&mut *conn).await?;
    let mut orders = Vec::with_capacity(rows.len());
    for row in rows {
        orders.push(expand(row, &mut *conn).await?);
    }
    trace!("📝️ Fetched {} orders", orders.len());
    Ok(orders)
}

pub async fn update_order_status(
    id: i64,
    status: OrderStatusType,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let q = format!(
        "UPDATE orders SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING {ORDER_COLUMNS}"
    );
    let row: Option<OrderRow> = sqlx::query_as(&q).bind(status).bind(id).fetch_optional(&mut *conn).await?;
    match row {
        Some(row) => {
            debug!("📝️ Order #{id} status changed to {status}");
            let products = product_ids_for_order(row.id, conn).await?;
            Ok(Some(row.into_order(products)))
        },
        None => Ok(None),
    }
}
