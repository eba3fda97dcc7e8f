//! Authentication gate and the [`AuthUser`] extractor.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, Method, header, request::Parts},
    middleware::Next,
    response::Response,
};

use roster_auth::{AuthenticatedUser, RouteAccess, verify_token};
use roster_config::JwtConfig;
use roster_core::AppError;

use crate::metrics::{Event, record};
use crate::state::AppState;

/// Runs before every table route. Open routes and CORS preflights pass
/// untouched; everything else needs a verifiable bearer token, whose user
/// is stored in request extensions for the authorizer and handlers.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let access = req
        .extensions()
        .get::<RouteAccess>()
        .cloned()
        .unwrap_or_default();

    if access.is_open() {
        return Ok(next.run(req).await);
    }

    let user = user_from_headers(req.headers(), &state.jwt_config)?;
    tracing::debug!(username = %user.username, "Authenticated request");

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Extracts the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized("Authorization header is missing"))?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized("Authorization header is malformed"))
}

pub fn user_from_headers(
    headers: &HeaderMap,
    jwt_config: &JwtConfig,
) -> Result<AuthenticatedUser, AppError> {
    let token = bearer_token(headers)?;

    let result = verify_token(token, jwt_config);
    record(Event::TokenChecked { valid: result.is_ok() });

    result.map_err(|e| {
        tracing::debug!(reason = %e, "Token rejected");
        AppError::unauthorized(format!("Unauthorized. Could not verify token: {}", e))
    })
}

/// Caller identity for handlers. Uses the user stored by [`authenticate`]
/// and otherwise verifies the request's bearer token itself, which lets
/// open routes opt into authentication.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(AuthUser(user.clone()));
        }

        user_from_headers(&parts.headers, &state.jwt_config).map(AuthUser)
    }
}
