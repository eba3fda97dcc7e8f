use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::persons::PersonInput;

/// Person held by the in-memory demo collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenPerson {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[schema(value_type = String, format = Date, example = "1990-04-12")]
    pub birth_date: NaiveDate,
}

impl OpenPerson {
    pub fn from_input(id: Uuid, input: PersonInput) -> Self {
        Self {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            birth_date: input.birth_date,
        }
    }
}
