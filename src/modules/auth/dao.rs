//! Persistence for users and their roles.

use anyhow::anyhow;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use roster_auth::Role;
use roster_core::{AppError, hash_password, verify_password};
use roster_models::users::{User, UserDto};

pub struct SecurityDao;

impl SecurityDao {
    /// Returns the user when `password` matches the stored hash.
    #[instrument(skip(db, password))]
    pub async fn get_verified_user(
        db: &PgPool,
        username: &str,
        password: &str,
    ) -> Result<UserDto, AppError> {
        let mut tx = db.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "SELECT username, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(wrong_credentials)?;

        if !verify_password(password, &user.password)? {
            return Err(wrong_credentials());
        }

        let roles = fetch_roles(&mut tx, username).await?;
        tx.commit().await?;

        Ok(UserDto {
            username: user.username,
            roles,
        })
    }

    /// Creates a user holding `roles`, creating missing role rows.
    #[instrument(skip(db, password))]
    pub async fn create_user(
        db: &PgPool,
        username: &str,
        password: &str,
        roles: &[Role],
    ) -> Result<UserDto, AppError> {
        let password_hash = hash_password(password)?;

        let mut tx = db.begin().await?;

        sqlx::query("INSERT INTO users (username, password) VALUES ($1, $2)")
            .bind(username)
            .bind(&password_hash)
            .execute(&mut *tx)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    AppError::unprocessable(anyhow!("User already exists"))
                }
                _ => AppError::internal(e),
            })?;

        for role in roles {
            grant_role(&mut tx, username, *role).await?;
        }

        let roles = fetch_roles(&mut tx, username).await?;
        tx.commit().await?;

        tracing::info!(%username, ?roles, "User created");
        Ok(UserDto {
            username: username.to_string(),
            roles,
        })
    }

    #[instrument(skip(db))]
    pub async fn add_role_to_user(
        db: &PgPool,
        username: &str,
        role: Role,
    ) -> Result<UserDto, AppError> {
        let mut tx = db.begin().await?;

        lock_user(&mut tx, username).await?;
        grant_role(&mut tx, username, role).await?;

        let roles = fetch_roles(&mut tx, username).await?;
        tx.commit().await?;

        Ok(UserDto {
            username: username.to_string(),
            roles,
        })
    }

    /// Removing a role the user does not hold is a no-op; removing the
    /// user's last role is rejected.
    #[instrument(skip(db))]
    pub async fn remove_role_from_user(
        db: &PgPool,
        username: &str,
        role: Role,
    ) -> Result<UserDto, AppError> {
        let mut tx = db.begin().await?;

        lock_user(&mut tx, username).await?;

        let current = fetch_roles(&mut tx, username).await?;
        if current.iter().all(|r| r == role.as_str()) && !current.is_empty() {
            return Err(AppError::unprocessable(anyhow!(
                "Cannot remove the last role of user {}",
                username
            )));
        }

        sqlx::query("DELETE FROM user_roles WHERE username = $1 AND role_name = $2")
            .bind(username)
            .bind(role.as_str())
            .execute(&mut *tx)
            .await?;

        let roles = fetch_roles(&mut tx, username).await?;
        tx.commit().await?;

        Ok(UserDto {
            username: username.to_string(),
            roles,
        })
    }

    #[instrument(skip(db))]
    pub async fn roles_for(db: &PgPool, username: &str) -> Result<Vec<String>, AppError> {
        let mut tx = db.begin().await?;
        lock_user(&mut tx, username).await?;
        let roles = fetch_roles(&mut tx, username).await?;
        tx.commit().await?;
        Ok(roles)
    }
}

fn wrong_credentials() -> AppError {
    AppError::unauthorized("Wrong username or password")
}

async fn lock_user(tx: &mut Transaction<'_, Postgres>, username: &str) -> Result<(), AppError> {
    sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE username = $1 FOR UPDATE")
        .bind(username)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("No user with username: {}", username)))?;
    Ok(())
}

async fn grant_role(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
    role: Role,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO roles (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
        .bind(role.as_str())
        .execute(&mut **tx)
        .await?;

    sqlx::query(
        "INSERT INTO user_roles (username, role_name) VALUES ($1, $2)
         ON CONFLICT (username, role_name) DO NOTHING",
    )
    .bind(username)
    .bind(role.as_str())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn fetch_roles(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT role_name FROM user_roles WHERE username = $1 ORDER BY role_name",
    )
    .bind(username)
    .fetch_all(&mut **tx)
    .await
}
