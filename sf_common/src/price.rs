use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
    str::FromStr,
};

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const STORE_CURRENCY_CODE: &str = "USD";

//--------------------------------------        Price          ---------------------------------------------------------
/// A monetary amount in the store currency, held as a whole number of cents.
///
/// Over the wire (JSON) prices are decimal numbers, e.g. `99.99`, which is what storefront clients send and expect.
/// Internally, and in the database, they are integer cents so that totals never accumulate floating point error.
#[derive(Debug, Clone, Copy, Default, Type, PartialEq, Eq, Ord, PartialOrd, Hash)]
#[sqlx(transparent)]
pub struct Price(i64);

op!(binary Price, Add, add);
op!(binary Price, Sub, sub);
op!(inplace Price, AddAssign, add_assign);

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Value cannot be represented as a price: {0}")]
pub struct PriceConversionError(String);

impl Price {
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Adds two prices, returning `None` instead of wrapping when the sum does not fit.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl TryFrom<f64> for Price {
    type Error = PriceConversionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(PriceConversionError(format!("{value} is not a finite number")));
        }
        if value < 0.0 {
            return Err(PriceConversionError(format!("{value} is negative")));
        }
        let cents = (value * 100.0).round();
        if cents > i64::MAX as f64 {
            return Err(PriceConversionError(format!("{value} is too large")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(cents as i64))
    }
}

impl FromStr for Price {
    type Err = PriceConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<f64>().map_err(|e| PriceConversionError(format!("{s}: {e}")))?;
        Self::try_from(value)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Price::try_from(value).map_err(D::Error::custom)
    }
}
