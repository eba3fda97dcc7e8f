//! Role-annotated route table.
//!
//! Every route is registered together with its [`RouteAccess`]. Registration
//! wraps the handler in the access gate (auth, then role check) and records
//! a [`RouteDescriptor`] for the route overview.
//!
//! ```ignore
//! let table = RouteTable::new(state.clone())
//!     .get("/", get_all_persons, RouteAccess::public())
//!     .post("/", create_person, RouteAccess::roles([Role::Admin]));
//! ```

use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    handler::Handler,
    http::Method,
    middleware,
    routing::{MethodRouter, delete, get, post, put},
};
use serde::Serialize;
use utoipa::ToSchema;

use roster_auth::RouteAccess;

use crate::middleware::auth::authenticate;
use crate::middleware::role::authorize;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RouteDescriptor {
    pub method: String,
    pub path: String,
    /// Required role names, or `["ANYONE"]` for open routes.
    pub roles: Vec<String>,
}

pub struct RouteTable {
    state: AppState,
    router: Router<AppState>,
    descriptors: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            router: Router::new(),
            descriptors: Vec::new(),
        }
    }

    pub fn get<H, T>(self, path: &str, handler: H, access: RouteAccess) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.route(Method::GET, path, get(handler), access)
    }

    pub fn post<H, T>(self, path: &str, handler: H, access: RouteAccess) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.route(Method::POST, path, post(handler), access)
    }

    pub fn put<H, T>(self, path: &str, handler: H, access: RouteAccess) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.route(Method::PUT, path, put(handler), access)
    }

    pub fn delete<H, T>(self, path: &str, handler: H, access: RouteAccess) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.route(Method::DELETE, path, delete(handler), access)
    }

    /// Registers one method on `path`. Methods registered separately on the
    /// same path are merged by the router, each keeping its own gate.
    fn route(
        mut self,
        method: Method,
        path: &str,
        method_router: MethodRouter<AppState>,
        access: RouteAccess,
    ) -> Self {
        self.descriptors.push(RouteDescriptor {
            method: method.to_string(),
            path: path.to_string(),
            roles: access.role_names(),
        });

        // Layers run outermost first: access marker, authenticate, authorize.
        let guarded = method_router
            .route_layer(middleware::from_fn(authorize))
            .route_layer(middleware::from_fn_with_state(
                self.state.clone(),
                authenticate,
            ))
            .route_layer(Extension(access));

        self.router = self.router.route(path, guarded);
        self
    }

    /// Mounts `other` under `prefix`, prefixing its descriptors.
    pub fn nest(mut self, prefix: &str, other: RouteTable) -> Self {
        self.descriptors
            .extend(other.descriptors.into_iter().map(|d| RouteDescriptor {
                path: join_path(prefix, &d.path),
                ..d
            }));
        self.router = self.router.nest(prefix, other.router);
        self
    }

    pub fn descriptors(&self) -> &[RouteDescriptor] {
        &self.descriptors
    }

    pub fn into_parts(self) -> (Router<AppState>, Vec<RouteDescriptor>) {
        (self.router, self.descriptors)
    }
}

fn join_path(prefix: &str, path: &str) -> String {
    match path {
        "" | "/" => prefix.to_string(),
        _ => format!("{}{}", prefix.trim_end_matches('/'), path),
    }
}

#[utoipa::path(
    get,
    path = "/api/routes",
    responses(
        (status = 200, description = "Every registered route with its access requirement", body = Vec<RouteDescriptor>)
    ),
    tag = "Routes"
)]
pub async fn list_routes(
    Extension(descriptors): Extension<Arc<Vec<RouteDescriptor>>>,
) -> Json<Vec<RouteDescriptor>> {
    Json(descriptors.as_ref().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/person", "/"), "/person");
        assert_eq!(join_path("/person", "/{id}"), "/person/{id}");
        assert_eq!(join_path("/api/", "/routes"), "/api/routes");
    }
}
