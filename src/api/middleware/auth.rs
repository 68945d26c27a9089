//! Admin gate middleware for destructive endpoints.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Lets the request through only if the admin gate authorizes it.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// A missing or malformed header counts as no token. With no
/// `ADMIN_TOKEN_HASH` configured every request passes.
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` when the gate
/// is enforced and the token is missing or wrong.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::delete, middleware};
/// use crate::api::middleware::auth;
///
/// let admin = Router::new()
///     .route("/quote/{id}", delete(delete_quote_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|AuthBearer(token)| token);

    if !st.auth_service.is_authorized(token.as_deref()) {
        tracing::warn!(
            path = %parts.uri.path(),
            token_present = token.is_some(),
            "Admin request denied"
        );
        return Err(AppError::unauthorized(
            "A valid admin token is required for this operation",
        ));
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}
