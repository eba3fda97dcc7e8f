//! Process-local person collection backing `/api/open/person`.
//!
//! The store lives in [`AppState`](crate::state::AppState) and is shared by
//! cloning; all clones see the same map.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::anyhow;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use roster_core::AppError;
use roster_models::open_persons::OpenPerson;
use roster_models::persons::{PersonInput, demo_persons};

#[derive(Clone, Debug, Default)]
pub struct OpenPersonStore {
    persons: Arc<RwLock<BTreeMap<Uuid, OpenPerson>>>,
}

impl OpenPersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the three demo persons.
    pub fn seeded() -> Self {
        let persons = demo_persons(Utc::now().date_naive())
            .into_iter()
            .map(|input| {
                let id = Uuid::new_v4();
                (id, OpenPerson::from_input(id, input))
            })
            .collect();

        Self {
            persons: Arc::new(RwLock::new(persons)),
        }
    }

    pub async fn all(&self) -> BTreeMap<Uuid, OpenPerson> {
        self.persons.read().await.clone()
    }

    pub async fn get(&self, id: Uuid) -> Result<OpenPerson, AppError> {
        self.persons
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found_id(id))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<OpenPerson, AppError> {
        self.persons
            .read()
            .await
            .values()
            .find(|p| p.email == email)
            .cloned()
            .ok_or_else(|| AppError::not_found(anyhow!("No person with email: {}", email)))
    }

    pub async fn create(&self, input: PersonInput) -> Result<OpenPerson, AppError> {
        let mut persons = self.persons.write().await;
        ensure_email_free(&persons, &input.email, None)?;

        let id = Uuid::new_v4();
        let person = OpenPerson::from_input(id, input);
        persons.insert(id, person.clone());

        Ok(person)
    }

    pub async fn update(&self, id: Uuid, input: PersonInput) -> Result<OpenPerson, AppError> {
        let mut persons = self.persons.write().await;
        if !persons.contains_key(&id) {
            return Err(not_found_id(id));
        }
        ensure_email_free(&persons, &input.email, Some(id))?;

        let person = OpenPerson::from_input(id, input);
        persons.insert(id, person.clone());

        Ok(person)
    }

    pub async fn delete(&self, id: Uuid) -> Result<OpenPerson, AppError> {
        self.persons
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| not_found_id(id))
    }
}

fn not_found_id(id: Uuid) -> AppError {
    AppError::not_found(anyhow!("No person with id: {}", id))
}

fn ensure_email_free(
    persons: &BTreeMap<Uuid, OpenPerson>,
    email: &str,
    except: Option<Uuid>,
) -> Result<(), AppError> {
    let taken = persons
        .values()
        .any(|p| Some(p.id) != except && p.email == email);

    if taken {
        return Err(AppError::unprocessable(anyhow!(
            "A person with email {} already exists",
            email
        )));
    }
    Ok(())
}
