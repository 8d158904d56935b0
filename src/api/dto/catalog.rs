//! DTOs for catalog endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, StringWithSeparator, formats::CommaSeparator, serde_as};

use crate::domain::entities::{BestSeller, BrandOption, CategoryOption, DiscountedProduct};

pub const DEFAULT_TAKE: i64 = 12;
pub const MAX_TAKE: i64 = 50;

/// Clamps a requested `take` into `[1, 50]`, defaulting to 12.
pub fn clamp_take(take: Option<i64>) -> usize {
    take.unwrap_or(DEFAULT_TAKE).clamp(1, MAX_TAKE) as usize
}

/// Query for `GET /api/public/amazing-products`.
///
/// `categoryIds` is a comma-separated list, e.g. `categoryIds=3,8`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct AmazingProductsQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub take: Option<i64>,

    #[serde_as(as = "StringWithSeparator::<CommaSeparator, i64>")]
    #[serde(default, rename = "categoryIds")]
    pub category_ids: Vec<i64>,
}

/// Query for `GET /api/public/best-selling-products`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct TakeQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub take: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AmazingProductItem {
    pub product_id: i64,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub brand_name: Option<String>,
    pub offer_id: i64,
    pub price: Decimal,
    pub discount_price: Decimal,
    pub discount_percent: Decimal,
}

impl From<DiscountedProduct> for AmazingProductItem {
    fn from(p: DiscountedProduct) -> Self {
        let discount_percent = p.discount_percent();
        Self {
            product_id: p.product_id,
            name: p.name,
            slug: p.slug,
            image_url: p.image_url,
            brand_name: p.brand_name,
            offer_id: p.offer_id,
            price: p.price,
            discount_price: p.discount_price,
            discount_percent,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BestSellerItem {
    pub product_id: i64,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub price: Decimal,
    pub total_sold: i64,
}

impl From<BestSeller> for BestSellerItem {
    fn from(b: BestSeller) -> Self {
        Self {
            product_id: b.product_id,
            name: b.name,
            slug: b.slug,
            image_url: b.image_url,
            price: b.price,
            total_sold: b.total_sold,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BrandOptionItem {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
}

impl From<BrandOption> for BrandOptionItem {
    fn from(b: BrandOption) -> Self {
        Self {
            id: b.id,
            name: b.name,
            slug: b.slug,
            logo_url: b.logo_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryOptionItem {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub slug: String,
}

impl From<CategoryOption> for CategoryOptionItem {
    fn from(c: CategoryOption) -> Self {
        Self {
            id: c.id,
            parent_id: c.parent_id,
            name: c.name,
            slug: c.slug,
        }
    }
}
