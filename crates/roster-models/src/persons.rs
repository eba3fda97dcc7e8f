//! Person domain models and DTOs.
//!
//! [`Person`] mirrors the `persons` table. [`PersonDto`] is the camelCase
//! shape returned to clients and [`PersonInput`] the validated body accepted
//! by create and update.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Person {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[schema(value_type = String, format = Date, example = "1990-04-12")]
    pub birth_date: NaiveDate,
}

impl From<Person> for PersonDto {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            first_name: person.first_name,
            last_name: person.last_name,
            email: person.email,
            birth_date: person.birth_date,
        }
    }
}

/// Body of `POST /person` and `PUT /person/{id}`. An `id` in the body is
/// ignored; the path decides which record is updated.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonInput {
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Hans")]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Hansen")]
    pub last_name: String,
    #[validate(email, length(max = 255))]
    #[schema(example = "hans@example.com", max_length = 255)]
    pub email: String,
    #[validate(custom(function = "not_in_future"))]
    #[schema(value_type = String, format = Date, example = "1990-04-12")]
    pub birth_date: NaiveDate,
}

/// The three persons written by the data reset and the seeder.
pub fn demo_persons(birth_date: NaiveDate) -> Vec<PersonInput> {
    [
        ("Hans", "hans@gmail.com"),
        ("Grethe", "grethe@gmail.com"),
        ("Heksen", "heks@gmail.com"),
    ]
    .into_iter()
    .map(|(first_name, email)| PersonInput {
        first_name: first_name.to_string(),
        last_name: "Hansen".to_string(),
        email: email.to_string(),
        birth_date,
    })
    .collect()
}

pub fn not_in_future(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date > Utc::now().date_naive() {
        let mut err = ValidationError::new("birth_date_in_future");
        err.message = Some("Birth date cannot be in the future".into());
        return Err(err);
    }
    Ok(())
}
