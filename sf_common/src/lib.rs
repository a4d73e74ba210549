mod price;

pub mod op;
mod secret;

pub use price::{Price, PriceConversionError, STORE_CURRENCY_CODE};
pub use secret::Secret;
