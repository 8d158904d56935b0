//! Bearer token authentication and permission checks.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::entities::Principal;
use crate::{error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Resolve the token hash to a non-revoked API token
/// 3. Update `last_used_at` timestamp
/// 4. Store the [`Principal`] in request extensions for handlers
/// 5. Copy it into response extensions so the audit layer can attribute the request
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token is not found or revoked
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let principal = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(principal.clone());

    let mut response = next.run(req).await;
    response.extensions_mut().insert(principal);

    Ok(response)
}

/// Rejects requests whose principal lacks `permission`.
///
/// Must run inside [`layer`]. The permission is the middleware state:
///
/// ```rust,ignore
/// Router::new()
///     .route("/reports/overview", get(reports_overview_handler))
///     .route_layer(middleware::from_fn_with_state(
///         permissions::REPORTS_READ,
///         auth::require_permission,
///     ));
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` when no principal is present and
/// `403 Forbidden` when the permission is missing.
pub async fn require_permission(
    State(permission): State<&'static str>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = req.extensions().get::<Principal>().ok_or_else(|| {
        AppError::unauthorized("Unauthorized", json!({"reason": "No authenticated principal"}))
    })?;

    if !principal.has_permission(permission) {
        tracing::info!(
            user_id = %principal.user_id,
            permission,
            "Permission denied"
        );
        return Err(AppError::forbidden(
            "Forbidden",
            json!({ "required_permission": permission }),
        ));
    }

    Ok(next.run(req).await)
}

/// Extractor for the principal stored by [`layer`].
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentPrincipal)
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "No authenticated principal"}),
                )
            })
    }
}
