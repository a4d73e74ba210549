use serde::{Deserialize, Serialize};
use sf_common::Price;

/// Offset pagination over the catalogue, newest products first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductPage {
    pub limit: i64,
    pub offset: i64,
}

impl ProductPage {
    pub fn first(limit: i64) -> Self {
        Self { limit, offset: 0 }
    }

    /// Page numbers start at 1. Page 0 and negative pages are treated as page 1. Pages too far out to address
    /// saturate to the largest offset, which matches no rows.
    pub fn numbered(page: i64, per_page: i64) -> Self {
        let page = page.max(1);
        Self { limit: per_page, offset: (page - 1).saturating_mul(per_page) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Price,
    pub max: Price,
}

/// Storefront filter panel: a set of category ids (empty means "any category") and an optional inclusive price range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category_ids: Vec<i64>,
    pub price_range: Option<PriceRange>,
}

impl ProductFilter {
    pub fn with_categories(mut self, ids: Vec<i64>) -> Self {
        self.category_ids = ids;
        self
    }

    pub fn with_price_range(mut self, min: Price, max: Price) -> Self {
        self.price_range = Some(PriceRange { min, max });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.category_ids.is_empty() && self.price_range.is_none()
    }
}
