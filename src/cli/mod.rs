//! Administrative commands behind the `roster-cli` binary.

pub mod seeder;

use sqlx::PgPool;

use roster_auth::Role;
use roster_models::users::UserDto;

use crate::modules::auth::dao::SecurityDao;

pub async fn create_user(
    db: &PgPool,
    username: &str,
    password: &str,
    roles: &[Role],
) -> anyhow::Result<UserDto> {
    let roles = if roles.is_empty() { &[Role::User][..] } else { roles };
    SecurityDao::create_user(db, username, password, roles)
        .await
        .map_err(|e| e.error)
}

pub async fn add_role(db: &PgPool, username: &str, role: Role) -> anyhow::Result<UserDto> {
    SecurityDao::add_role_to_user(db, username, role)
        .await
        .map_err(|e| e.error)
}

pub async fn remove_role(db: &PgPool, username: &str, role: Role) -> anyhow::Result<UserDto> {
    SecurityDao::remove_role_from_user(db, username, role)
        .await
        .map_err(|e| e.error)
}

/// Roles currently held by `username`, sorted by name.
pub async fn list_roles(db: &PgPool, username: &str) -> anyhow::Result<Vec<String>> {
    SecurityDao::roles_for(db, username)
        .await
        .map_err(|e| e.error)
}
