//! Persistence for [`Person`] rows.
//!
//! Every operation runs in its own transaction; an early return drops the
//! transaction, which rolls it back.

use anyhow::anyhow;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use roster_core::AppError;
use roster_models::persons::{Person, PersonInput, demo_persons};

const PERSON_COLUMNS: &str = "id, first_name, last_name, email, birth_date";

pub struct PersonDao;

impl PersonDao {
    #[instrument(skip(db))]
    pub async fn get_all(db: &PgPool) -> Result<Vec<Person>, AppError> {
        let mut tx = db.begin().await?;

        let persons = sqlx::query_as::<_, Person>(&format!(
            "SELECT {PERSON_COLUMNS} FROM persons ORDER BY id"
        ))
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(persons)
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(db: &PgPool, id: i64) -> Result<Person, AppError> {
        let mut tx = db.begin().await?;

        let person = sqlx::query_as::<_, Person>(&format!(
            "SELECT {PERSON_COLUMNS} FROM persons WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found_id(id))?;

        tx.commit().await?;
        Ok(person)
    }

    #[instrument(skip(db))]
    pub async fn get_by_email(db: &PgPool, email: &str) -> Result<Person, AppError> {
        let mut tx = db.begin().await?;

        let person = sqlx::query_as::<_, Person>(&format!(
            "SELECT {PERSON_COLUMNS} FROM persons WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("No person with email: {}", email)))?;

        tx.commit().await?;
        Ok(person)
    }

    #[instrument(skip(db, input), fields(email = %input.email))]
    pub async fn create(db: &PgPool, input: PersonInput) -> Result<Person, AppError> {
        let mut tx = db.begin().await?;

        let person = insert(&mut tx, &input)
            .await
            .map_err(|e| map_unique_violation(e, &input.email))?;

        tx.commit().await?;
        Ok(person)
    }

    #[instrument(skip(db, input), fields(email = %input.email))]
    pub async fn update(db: &PgPool, id: i64, input: PersonInput) -> Result<Person, AppError> {
        let mut tx = db.begin().await?;

        lock_existing(&mut tx, id).await?;

        let person = sqlx::query_as::<_, Person>(&format!(
            "UPDATE persons
             SET first_name = $2, last_name = $3, email = $4, birth_date = $5
             WHERE id = $1
             RETURNING {PERSON_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(input.birth_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, &input.email))?;

        tx.commit().await?;
        Ok(person)
    }

    /// Deletes the person and returns the removed row.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i64) -> Result<Person, AppError> {
        let mut tx = db.begin().await?;

        let person = lock_existing(&mut tx, id).await?;

        sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(person)
    }

    /// Replaces every person with the three demo persons, born today.
    #[instrument(skip(db))]
    pub async fn reset_data(db: &PgPool) -> Result<Vec<Person>, AppError> {
        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM persons").execute(&mut *tx).await?;

        let mut persons = Vec::new();
        for input in demo_persons(Utc::now().date_naive()) {
            persons.push(insert(&mut tx, &input).await?);
        }

        tx.commit().await?;
        tracing::info!(count = persons.len(), "Person data reset");
        Ok(persons)
    }
}

async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    input: &PersonInput,
) -> Result<Person, sqlx::Error> {
    sqlx::query_as::<_, Person>(&format!(
        "INSERT INTO persons (first_name, last_name, email, birth_date)
         VALUES ($1, $2, $3, $4)
         RETURNING {PERSON_COLUMNS}"
    ))
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.email)
    .bind(input.birth_date)
    .fetch_one(&mut **tx)
    .await
}

/// Row-locks the person for the rest of the transaction, or 404s.
async fn lock_existing(tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<Person, AppError> {
    sqlx::query_as::<_, Person>(&format!(
        "SELECT {PERSON_COLUMNS} FROM persons WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| not_found_id(id))
}

fn not_found_id(id: i64) -> AppError {
    AppError::not_found(anyhow!("No person with id: {}", id))
}

fn map_unique_violation(err: sqlx::Error, email: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::unprocessable(
            anyhow!("A person with email {} already exists", email),
        ),
        _ => AppError::internal(err),
    }
}
