use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Row of the `users` table. `password` is a bcrypt hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub username: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RoleAssignmentRequest {
    #[validate(length(min = 1))]
    #[schema(example = "user")]
    pub username: String,
    #[validate(length(min = 1))]
    #[schema(example = "admin")]
    pub role: String,
}
