use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
pub use sf_common::Price;
use sqlx::{FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Conversion error: {0}")]
pub struct ConversionError(String);

//--------------------------------------        Role           ---------------------------------------------------------
/// Account roles. The numeric values are part of the public contract: `0` is a standard shopper and `1` is a store
/// administrator. Roles are stored and serialised as these integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Type)]
#[repr(i32)]
pub enum Role {
    #[default]
    User = 0,
    Admin = 1,
}

impl Role {
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl TryFrom<i32> for Role {
    type Error = ConversionError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::User),
            1 => Ok(Self::Admin),
            v => Err(ConversionError(format!("Invalid role: {v}"))),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.as_i32())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i32::deserialize(deserializer)?;
        Role::try_from(value).map_err(D::Error::custom)
    }
}

//--------------------------------------     UserAccount       ---------------------------------------------------------
/// A registered storefront account. The password and security-answer hashes are loaded from the database so that
/// they can be verified, but they are never serialised.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: Role,
    #[serde(skip)]
    pub password_hash: String,
    #[serde(skip)]
    pub answer_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------    NewUserAccount     ---------------------------------------------------------
/// Registration data. The password and answer fields hold argon2 hashes, never plain text.
#[derive(Debug, Clone, Default)]
pub struct NewUserAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub address: String,
    pub answer_hash: String,
    pub role: Role,
}

//--------------------------------------     ProfileUpdate     ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password_hash: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.password_hash.is_none()
    }
}

//--------------------------------------       Category        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

//--------------------------------------        Product        ---------------------------------------------------------
/// A catalogue item. The product photo lives in the same table but is only ever loaded by the photo endpoint, so it
/// is not part of this struct.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Price,
    pub category_id: i64,
    pub quantity: i64,
    pub shipping: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ProductPhoto {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// The data needed to create or replace a product. `photo: None` on an update leaves the stored photo untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Price,
    pub category_id: i64,
    pub quantity: i64,
    pub shipping: bool,
    pub photo: Option<ProductPhoto>,
}

/// The subset of product data embedded in order listings.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Price,
}

impl From<Product> for ProductSummary {
    fn from(p: Product) -> Self {
        Self { id: p.id, name: p.name, slug: p.slug, description: p.description, price: p.price }
    }
}

//--------------------------------------   OrderStatusType     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatusType {
    /// Payment was captured and the order has not been looked at yet.
    #[default]
    #[sqlx(rename = "Not Process")]
    #[serde(rename = "Not Process")]
    NotProcess,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::NotProcess => write!(f, "Not Process"),
            OrderStatusType::Processing => write!(f, "Processing"),
            OrderStatusType::Shipped => write!(f, "Shipped"),
            OrderStatusType::Delivered => write!(f, "Delivered"),
            OrderStatusType::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Not Process" => Ok(Self::NotProcess),
            "Processing" => Ok(Self::Processing),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

//--------------------------------------        Order          ---------------------------------------------------------
/// A completed purchase. Orders are only written after the payment gateway has accepted the sale, and are never
/// deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub buyer_id: i64,
    /// Product ids in the order they appeared in the cart.
    pub products: Vec<i64>,
    /// The raw transaction result returned by the payment gateway.
    pub payment: Value,
    pub status: OrderStatusType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub buyer_id: i64,
    pub products: Vec<i64>,
    pub payment: Value,
}

impl NewOrder {
    pub fn new(buyer_id: i64, products: Vec<i64>, payment: Value) -> Self {
        Self { buyer_id, products, payment }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct BuyerSummary {
    pub id: i64,
    pub name: String,
}

/// An order with its product ids and buyer id resolved, as shown in order listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub id: i64,
    pub products: Vec<ProductSummary>,
    pub payment: Value,
    pub buyer: BuyerSummary,
    pub status: OrderStatusType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
