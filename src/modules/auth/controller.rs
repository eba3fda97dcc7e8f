use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;
use utoipa::ToSchema;

use roster_auth::{AuthenticatedUser, Role, create_token};
use roster_core::AppError;
use roster_models::auth::{LoginRequest, MessageResponse, RegisterRequest, TokenResponse};
use roster_models::users::{RoleAssignmentRequest, UserDto};

use crate::metrics::{Event, record};
use crate::middleware::auth::AuthUser;
use crate::modules::auth::dao::SecurityDao;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

fn issue_token(user: &UserDto, state: &AppState) -> Result<TokenResponse, AppError> {
    let identity = AuthenticatedUser::new(user.username.clone(), user.roles.iter().cloned());
    let token = create_token(&identity, &state.jwt_config).map_err(AppError::internal)?;
    record(Event::TokenIssued);

    Ok(TokenResponse {
        token,
        username: user.username.clone(),
    })
}

fn parse_role(raw: &str) -> Result<Role, AppError> {
    raw.parse::<Role>().map_err(AppError::unprocessable)
}

/// Log in and receive a token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Wrong username or password", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto), fields(username = %dto.username))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = match SecurityDao::get_verified_user(&state.db, &dto.username, &dto.password).await {
        Ok(user) => user,
        Err(err) => {
            record(Event::Login { success: false });
            return Err(err);
        }
    };
    record(Event::Login { success: true });

    Ok(Json(issue_token(&user, &state)?))
}

/// Register a new user with the `user` role
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = TokenResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 422, description = "User already exists or invalid input", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto), fields(username = %dto.username))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let user =
        SecurityDao::create_user(&state.db, &dto.username, &dto.password, &[Role::User]).await?;
    record(Event::UserRegistered);

    Ok((StatusCode::CREATED, Json(issue_token(&user, &state)?)))
}

/// Check that the bearer token is valid
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    responses(
        (status = 200, description = "Token is valid", body = MessageResponse),
        (status = 401, description = "Missing, malformed or unverifiable token", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all, fields(username = %auth_user.0.username))]
pub async fn verify(auth_user: AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse::new("Token is valid"))
}

/// Grant a role to a user
#[utoipa::path(
    post,
    path = "/api/auth/user/addrole",
    request_body = RoleAssignmentRequest,
    responses(
        (status = 200, description = "Role granted", body = UserDto),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Unknown role", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.0.username))]
pub async fn add_role(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<RoleAssignmentRequest>,
) -> Result<Json<UserDto>, AppError> {
    let role = parse_role(&dto.role)?;
    let user = SecurityDao::add_role_to_user(&state.db, &dto.username, role).await?;
    Ok(Json(user))
}

/// Revoke a role from a user
#[utoipa::path(
    post,
    path = "/api/auth/user/removerole",
    request_body = RoleAssignmentRequest,
    responses(
        (status = 200, description = "Role revoked", body = UserDto),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Unknown role or last remaining role", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.0.username))]
pub async fn remove_role(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<RoleAssignmentRequest>,
) -> Result<Json<UserDto>, AppError> {
    let role = parse_role(&dto.role)?;
    let user = SecurityDao::remove_role_from_user(&state.db, &dto.username, role).await?;
    Ok(Json(user))
}
