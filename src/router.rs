use std::sync::Arc;

use axum::http::{HeaderValue, Method, header};
use axum::{Extension, Router, middleware};
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use roster_auth::RouteAccess;
use roster_config::CorsConfig;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::modules::auth::init_auth_routes;
use crate::modules::open_persons::init_open_persons_routes;
use crate::modules::persons::init_persons_routes;
use crate::modules::protected::init_protected_routes;
use crate::route_table::{RouteTable, list_routes};
use crate::state::AppState;

/// The full route table, paths relative to `/api`.
pub fn api_routes(state: AppState) -> RouteTable {
    RouteTable::new(state.clone())
        .nest("/open/person", init_open_persons_routes(state.clone()))
        .nest("/person", init_persons_routes(state.clone()))
        .nest("/auth", init_auth_routes(state.clone()))
        .nest("/protected", init_protected_routes(state))
        .get("/routes", list_routes, RouteAccess::public())
}

pub fn init_router(state: AppState) -> Router {
    let (api, descriptors) = RouteTable::new(state.clone())
        .nest("/api", api_routes(state.clone()))
        .into_parts();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(api)
        .layer(Extension(Arc::new(descriptors)))
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let allowed: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        AllowOrigin::list(allowed)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}
