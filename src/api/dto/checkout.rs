//! DTOs for the shipping options endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::entities::{ShippingOption, ShippingQuote, ShippingZone};

/// Query for `GET /api/checkout/shipping-options?addressId=`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ShippingOptionsQuery {
    #[serde_as(as = "DisplayFromStr")]
    #[serde(rename = "addressId")]
    pub address_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ShippingZoneSummary {
    pub id: i64,
    pub name: String,
}

impl From<ShippingZone> for ShippingZoneSummary {
    fn from(z: ShippingZone) -> Self {
        Self {
            id: z.id,
            name: z.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShippingOptionItem {
    pub rate_id: i64,
    pub method_id: i64,
    pub method_name: String,
    pub method_code: String,
    pub base_price: Decimal,
    pub price: Decimal,
    pub is_free: bool,
    pub eta_days_min: Option<i32>,
    pub eta_days_max: Option<i32>,
}

impl From<ShippingOption> for ShippingOptionItem {
    fn from(o: ShippingOption) -> Self {
        Self {
            rate_id: o.rate_id,
            method_id: o.method_id,
            method_name: o.method_name,
            method_code: o.method_code,
            base_price: o.base_price,
            price: o.price,
            is_free: o.is_free,
            eta_days_min: o.eta_days_min,
            eta_days_max: o.eta_days_max,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShippingOptionsResponse {
    pub zone: Option<ShippingZoneSummary>,
    pub order_amount: Decimal,
    pub options: Vec<ShippingOptionItem>,
}

impl From<ShippingQuote> for ShippingOptionsResponse {
    fn from(q: ShippingQuote) -> Self {
        Self {
            zone: q.zone.map(Into::into),
            order_amount: q.order_amount,
            options: q.options.into_iter().map(Into::into).collect(),
        }
    }
}
