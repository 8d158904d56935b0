//! Handler for checkout shipping options.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::api::dto::checkout::{ShippingOptionsQuery, ShippingOptionsResponse};
use crate::api::extract::ApiQuery;
use crate::api::middleware::auth::CurrentPrincipal;
use crate::error::AppError;
use crate::state::AppState;

/// Lists priced shipping options for the caller's cart.
///
/// # Endpoint
///
/// `GET /api/checkout/shipping-options?addressId=`
///
/// # Response
///
/// The matched zone (or `null`), the cart's order amount, and the options
/// sorted ascending by final price. An address outside every zone yields an
/// empty option list.
///
/// # Errors
///
/// - 400 Bad Request: `addressId` missing, address not owned by the caller, or empty cart
/// - 401 Unauthorized: missing or invalid token
pub async fn shipping_options_handler(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiQuery(params): ApiQuery<ShippingOptionsQuery>,
) -> Result<Json<ShippingOptionsResponse>, AppError> {
    let quote = state
        .checkout_service
        .shipping_options(&principal.user_id, params.address_id, Utc::now())
        .await?;

    Ok(Json(quote.into()))
}
