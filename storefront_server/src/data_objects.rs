use std::fmt::Display;

use serde::{Deserialize, Serialize};
use storefront_engine::{
    catalog_objects::ProductInput,
    db_types::{Price, ProductPhoto},
};

use crate::errors::ServerError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }
}

//----------------------------------------------   Auth  ----------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
    pub answer: String,
    #[serde(alias = "new_password")]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: String,
}

//----------------------------------------------   Catalog  ----------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRequest {
    pub name: String,
}

/// A product photo embedded in a JSON request as base64.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoUpload {
    pub data: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

fn default_content_type() -> String {
    "application/octet-stream".to_string()
}

impl PhotoUpload {
    pub fn decode(&self) -> Result<ProductPhoto, ServerError> {
        let data = base64::decode(self.data.trim())
            .map_err(|e| ServerError::ValidationError(format!("photo is not valid base64. {e}")))?;
        Ok(ProductPhoto { data, content_type: self.content_type.clone() })
    }
}

/// The body of the create and update product requests. Missing fields are reported by the catalog API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    #[serde(alias = "category_id")]
    pub category: Option<i64>,
    pub quantity: Option<i64>,
    pub shipping: Option<bool>,
    pub photo: Option<PhotoUpload>,
}

impl TryFrom<ProductRequest> for ProductInput {
    type Error = ServerError;

    fn try_from(req: ProductRequest) -> Result<Self, Self::Error> {
        let photo = req.photo.as_ref().map(PhotoUpload::decode).transpose()?;
        Ok(ProductInput {
            name: req.name,
            description: req.description,
            price: req.price,
            category_id: req.category,
            quantity: req.quantity,
            shipping: req.shipping,
            photo,
        })
    }
}

/// The storefront's filter panel: `checked` holds category ids, `radio` an optional `[min, max]` price pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFilterRequest {
    pub checked: Vec<i64>,
    pub radio: Vec<Price>,
}

impl ProductFilterRequest {
    pub fn price_range(&self) -> Result<Option<(Price, Price)>, ServerError> {
        match self.radio.as_slice() {
            [] => Ok(None),
            [min, max] => Ok(Some((*min, *max))),
            _ => Err(ServerError::ValidationError("radio must contain a minimum and a maximum price".to_string())),
        }
    }
}

//----------------------------------------------   Payments  ----------------------------------------------------

/// A cart entry. Clients may send bare product ids or product objects; only the id is used, since prices are always
/// taken from the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CartItem {
    Id(i64),
    Product {
        #[serde(alias = "_id")]
        id: i64,
    },
}

impl CartItem {
    pub fn product_id(&self) -> i64 {
        match self {
            CartItem::Id(id) => *id,
            CartItem::Product { id } => *id,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentRequest {
    pub nonce: String,
    pub cart: Vec<CartItem>,
}

impl PaymentRequest {
    pub fn product_ids(&self) -> Vec<i64> {
        self.cart.iter().map(CartItem::product_id).collect()
    }
}
