//! Repository trait for the data checkout needs: addresses, carts and shipping setup.

use crate::domain::entities::{Address, CartLine, ShippingRate, ShippingZone};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for checkout lookups.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCheckoutRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckoutRepository: Send + Sync {
    /// Finds a non-deleted address owned by `user_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Address))` if the address exists and belongs to the user
    /// - `Ok(None)` otherwise
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_address(&self, address_id: i64, user_id: &str)
    -> Result<Option<Address>, AppError>;

    /// Non-deleted lines of the user's cart, with their vendor offers.
    ///
    /// Returns an empty list when the user has no cart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn cart_lines(&self, user_id: &str) -> Result<Vec<CartLine>, AppError>;

    /// Active, non-deleted shipping zones.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn active_zones(&self) -> Result<Vec<ShippingZone>, AppError>;

    /// All rates of a zone joined with their methods, deleted ones included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn zone_rates(&self, zone_id: i64) -> Result<Vec<ShippingRate>, AppError>;
}
