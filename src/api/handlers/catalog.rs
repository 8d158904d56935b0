//! Handlers for public catalog endpoints.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::api::dto::catalog::{
    AmazingProductItem, AmazingProductsQuery, BestSellerItem, BrandOptionItem,
    CategoryOptionItem, TakeQuery, clamp_take,
};
use crate::api::extract::ApiQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Lists products with the deepest current discounts.
///
/// # Endpoint
///
/// `GET /api/public/amazing-products`
///
/// # Query Parameters
///
/// - `take` (optional): number of products, default 12, clamped to `[1, 50]`
/// - `categoryIds` (optional): comma-separated category ids; descendants are included
///
/// # Errors
///
/// Returns 400 Bad Request if `take` or `categoryIds` are not integers.
pub async fn amazing_products_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<AmazingProductsQuery>,
) -> Result<Json<Vec<AmazingProductItem>>, AppError> {
    let take = clamp_take(params.take);

    let products = state
        .catalog_service
        .amazing_products(params.category_ids, take, Utc::now())
        .await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Lists products ranked by units sold.
///
/// # Endpoint
///
/// `GET /api/public/best-selling-products?take=`
pub async fn best_sellers_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TakeQuery>,
) -> Result<Json<Vec<BestSellerItem>>, AppError> {
    let best = state
        .catalog_service
        .best_sellers(clamp_take(params.take))
        .await?;

    Ok(Json(best.into_iter().map(Into::into).collect()))
}

/// `GET /api/public/brands/options`
pub async fn brand_options_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<BrandOptionItem>>, AppError> {
    let brands = state.catalog_service.brand_options().await?;
    Ok(Json(brands.into_iter().map(Into::into).collect()))
}

/// `GET /api/public/productCategories/options`
pub async fn category_options_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryOptionItem>>, AppError> {
    let categories = state.catalog_service.category_options().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}
