//! Checkout: shipping options for the caller's cart and address.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{ShippingQuote, order_amount};
use crate::domain::repositories::CheckoutRepository;
use crate::domain::shipping::{price_rates, select_zone};
use crate::error::AppError;

/// Service resolving shipping options during checkout.
pub struct CheckoutService<R: CheckoutRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: CheckoutRepository + ?Sized> CheckoutService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Computes the shipping options available for `user_id`'s cart delivered to
    /// `address_id`.
    ///
    /// # Resolution
    ///
    /// 1. Load the address, which must belong to the caller
    /// 2. Sum the cart using valid discounted prices
    /// 3. Select the first matching zone by sort order
    /// 4. Filter and price that zone's rates
    ///
    /// No matching zone yields a quote with no options.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the address is unknown or owned by
    /// someone else, or if the cart is empty.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn shipping_options(
        &self,
        user_id: &str,
        address_id: i64,
        now: DateTime<Utc>,
    ) -> Result<ShippingQuote, AppError> {
        let (address, lines) = tokio::try_join!(
            self.repository.find_address(address_id, user_id),
            self.repository.cart_lines(user_id),
        )?;

        let address = address.ok_or_else(|| {
            AppError::bad_request("Invalid address", json!({ "address_id": address_id }))
        })?;

        if lines.is_empty() {
            return Err(AppError::bad_request("Cart is empty", json!({})));
        }

        let order_amount = order_amount(&lines, now);
        let zones = self.repository.active_zones().await?;

        let Some(zone) = select_zone(&zones, &address).cloned() else {
            tracing::debug!(address_id, country = %address.country_code, "No shipping zone matched");
            return Ok(ShippingQuote {
                zone: None,
                order_amount,
                options: Vec::new(),
            });
        };

        let rates = self.repository.zone_rates(zone.id).await?;
        let options = price_rates(&rates, order_amount);

        Ok(ShippingQuote {
            zone: Some(zone),
            order_amount,
            options,
        })
    }
}
