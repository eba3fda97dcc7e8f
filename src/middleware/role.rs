//! Role authorizer, run after [`authenticate`](super::auth::authenticate).

use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::Response,
};

use roster_auth::{AuthenticatedUser, RouteAccess, format_role_set};
use roster_core::AppError;

use crate::metrics::{Event, record};

/// Admits the caller when any of their roles is among the route's required
/// roles. Open routes pass untouched.
pub async fn authorize(req: Request, next: Next) -> Result<Response, AppError> {
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let access = req
        .extensions()
        .get::<RouteAccess>()
        .cloned()
        .unwrap_or_default();

    check_access(&access, req.extensions().get::<AuthenticatedUser>())?;

    Ok(next.run(req).await)
}

pub fn check_access(
    access: &RouteAccess,
    user: Option<&AuthenticatedUser>,
) -> Result<(), AppError> {
    let required = match access.required_roles() {
        Some(required) if !required.is_empty() => required,
        _ => return Ok(()),
    };

    let user = user.ok_or_else(|| AppError::forbidden("No user was added from the token"))?;

    let allowed = user.has_any_role(required);
    record(Event::AccessChecked {
        allowed,
        required: &access.to_string(),
    });

    if !allowed {
        tracing::warn!(
            username = %user.username,
            needed = %access,
            "Access denied"
        );
        return Err(AppError::forbidden(format!(
            "User was not authorized with roles: {}. Needed roles are: {}",
            format_role_set(&user.roles),
            format_role_set(required)
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use roster_auth::Role;

    #[test]
    fn test_open_access_needs_no_user() {
        assert!(check_access(&RouteAccess::public(), None).is_ok());
        assert!(check_access(&RouteAccess::roles([]), None).is_ok());
    }

    #[test]
    fn test_missing_user_is_forbidden() {
        let err = check_access(&RouteAccess::roles([Role::User]), None).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.message(), "No user was added from the token");
    }

    #[test]
    fn test_role_mismatch_names_both_sets() {
        let user = AuthenticatedUser::new("user", ["user"]);
        let err = check_access(&RouteAccess::roles([Role::Admin]), Some(&user)).unwrap_err();

        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(
            err.message(),
            "User was not authorized with roles: [user]. Needed roles are: [ADMIN]"
        );
    }

    #[test]
    fn test_any_matching_role_is_enough() {
        let user = AuthenticatedUser::new("super", ["user", "admin"]);
        assert!(check_access(&RouteAccess::roles([Role::Admin]), Some(&user)).is_ok());

        let upper = AuthenticatedUser::new("admin", ["ADMIN"]);
        assert!(
            check_access(&RouteAccess::roles([Role::User, Role::Admin]), Some(&upper)).is_ok()
        );
    }
}
