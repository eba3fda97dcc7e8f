use axum::Json;
use tracing::instrument;

use roster_models::auth::MessageResponse;

use crate::middleware::auth::AuthUser;

#[utoipa::path(
    get,
    path = "/api/protected/user_demo",
    responses(
        (status = 200, description = "Caller holds USER", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires USER")
    ),
    tag = "Protected",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all, fields(username = %auth_user.0.username))]
pub async fn user_demo(auth_user: AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello from USER Protected"))
}

#[utoipa::path(
    get,
    path = "/api/protected/admin_demo",
    responses(
        (status = 200, description = "Caller holds ADMIN", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires ADMIN")
    ),
    tag = "Protected",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all, fields(username = %auth_user.0.username))]
pub async fn admin_demo(auth_user: AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello from ADMIN Protected"))
}
