//! Demo data seeding.
//!
//! Recreates the `user` and `admin` roles, the three demo accounts and the
//! three demo persons, then optionally adds generated persons.

use std::time::Instant;

use chrono::{Duration, Utc};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use sqlx::PgPool;

use roster_auth::Role;
use roster_models::persons::PersonInput;

use crate::modules::auth::dao::SecurityDao;
use crate::modules::persons::dao::PersonDao;

/// Username, password and roles of the demo accounts.
pub const SEED_USERS: [(&str, &str, &[Role]); 3] = [
    ("user", "user123", &[Role::User]),
    ("admin", "admin123", &[Role::Admin]),
    ("super", "super123", &[Role::User, Role::Admin]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub persons: usize,
}

pub async fn seed_database(db: &PgPool, fake_persons: usize) -> anyhow::Result<SeedSummary> {
    let start = Instant::now();
    println!("🌱 Seeding database...");

    reset_users_and_roles(db).await?;
    for (username, password, roles) in SEED_USERS {
        SecurityDao::create_user(db, username, password, roles)
            .await
            .map_err(|e| e.error)?;
        println!("   ✓ {} {:?}", username, roles);
    }

    let mut persons = PersonDao::reset_data(db).await.map_err(|e| e.error)?.len();
    for index in 0..fake_persons {
        PersonDao::create(db, fake_person(index))
            .await
            .map_err(|e| e.error)?;
        persons += 1;
    }
    println!("   ✓ {} persons", persons);

    println!("\n✅ Seeding completed in {:?}", start.elapsed());
    Ok(SeedSummary {
        users: SEED_USERS.len(),
        persons,
    })
}

async fn reset_users_and_roles(db: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM user_roles").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM users").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM roles").execute(&mut *tx).await?;

    for role in Role::ALL {
        sqlx::query("INSERT INTO roles (name) VALUES ($1)")
            .bind(role.as_str())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await
}

/// A generated person. `index` keeps emails unique within one run.
pub fn fake_person(index: usize) -> PersonInput {
    let email: String = SafeEmail().fake();
    let age_days: i64 = (18 * 365..80 * 365).fake();

    PersonInput {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        email: format!("{}.{}", index, email),
        birth_date: Utc::now().date_naive() - Duration::days(age_days),
    }
}
