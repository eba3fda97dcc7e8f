//! Handlers for the in-memory collection. All routes are open.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use roster_core::AppError;
use roster_models::open_persons::OpenPerson;
use roster_models::persons::PersonInput;

use crate::state::AppState;
use crate::validator::{PathParam, ValidatedJson};

#[utoipa::path(
    get,
    path = "/api/open/person",
    responses(
        (status = 200, description = "All persons keyed by id", body = BTreeMap<String, OpenPerson>)
    ),
    tag = "Open Persons"
)]
#[instrument(skip(state))]
pub async fn get_all(State(state): State<AppState>) -> Json<BTreeMap<Uuid, OpenPerson>> {
    Json(state.open_persons.all().await)
}

#[utoipa::path(
    get,
    path = "/api/open/person/{id}",
    params(("id" = Uuid, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Person details", body = OpenPerson),
        (status = 404, description = "Person not found")
    ),
    tag = "Open Persons"
)]
#[instrument(skip(state))]
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<OpenPerson>, AppError> {
    Ok(Json(state.open_persons.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/open/person/email/{email}",
    params(("email" = String, Path, description = "Person email")),
    responses(
        (status = 200, description = "Person details", body = OpenPerson),
        (status = 404, description = "Person not found")
    ),
    tag = "Open Persons"
)]
#[instrument(skip(state))]
pub async fn get_by_email(
    State(state): State<AppState>,
    PathParam(email): PathParam<String>,
) -> Result<Json<OpenPerson>, AppError> {
    Ok(Json(state.open_persons.get_by_email(&email).await?))
}

#[utoipa::path(
    post,
    path = "/api/open/person",
    request_body = PersonInput,
    responses(
        (status = 201, description = "Person created", body = OpenPerson),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Validation failed or email already in use")
    ),
    tag = "Open Persons"
)]
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<PersonInput>,
) -> Result<(StatusCode, Json<OpenPerson>), AppError> {
    let person = state.open_persons.create(input).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

#[utoipa::path(
    put,
    path = "/api/open/person/{id}",
    params(("id" = Uuid, Path, description = "Person ID")),
    request_body = PersonInput,
    responses(
        (status = 200, description = "Person updated", body = OpenPerson),
        (status = 404, description = "Person not found"),
        (status = 422, description = "Validation failed or email already in use")
    ),
    tag = "Open Persons"
)]
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
    ValidatedJson(input): ValidatedJson<PersonInput>,
) -> Result<Json<OpenPerson>, AppError> {
    Ok(Json(state.open_persons.update(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/api/open/person/{id}",
    params(("id" = Uuid, Path, description = "Person ID")),
    responses(
        (status = 200, description = "The removed person", body = OpenPerson),
        (status = 404, description = "Person not found")
    ),
    tag = "Open Persons"
)]
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<OpenPerson>, AppError> {
    Ok(Json(state.open_persons.delete(id).await?))
}
