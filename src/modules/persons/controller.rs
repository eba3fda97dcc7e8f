use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;

use roster_core::AppError;
use roster_models::auth::MessageResponse;
use roster_models::persons::{PersonDto, PersonInput};

use crate::metrics::{Event, record};
use crate::modules::persons::dao::PersonDao;
use crate::state::AppState;
use crate::validator::{PathParam, ValidatedJson};

#[utoipa::path(
    get,
    path = "/api/person",
    responses(
        (status = 200, description = "All persons ordered by id", body = Vec<PersonDto>)
    ),
    tag = "Persons"
)]
#[instrument(skip(state))]
pub async fn get_all_persons(State(state): State<AppState>) -> Result<Json<Vec<PersonDto>>, AppError> {
    let persons = PersonDao::get_all(&state.db).await?;
    Ok(Json(persons.into_iter().map(PersonDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/person/resetdata",
    responses(
        (status = 200, description = "Persons replaced with the demo set", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires ADMIN")
    ),
    tag = "Persons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn reset_data(State(state): State<AppState>) -> Result<Json<MessageResponse>, AppError> {
    PersonDao::reset_data(&state.db).await?;
    Ok(Json(MessageResponse::new("Data reset")))
}

#[utoipa::path(
    get,
    path = "/api/person/{id}",
    params(("id" = i64, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Person details", body = PersonDto),
        (status = 404, description = "Person not found")
    ),
    tag = "Persons"
)]
#[instrument(skip(state))]
pub async fn get_person(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<PersonDto>, AppError> {
    let person = PersonDao::get_by_id(&state.db, id).await?;
    Ok(Json(person.into()))
}

#[utoipa::path(
    get,
    path = "/api/person/email/{email}",
    params(("email" = String, Path, description = "Person email")),
    responses(
        (status = 200, description = "Person details", body = PersonDto),
        (status = 404, description = "Person not found")
    ),
    tag = "Persons"
)]
#[instrument(skip(state))]
pub async fn get_person_by_email(
    State(state): State<AppState>,
    PathParam(email): PathParam<String>,
) -> Result<Json<PersonDto>, AppError> {
    let person = PersonDao::get_by_email(&state.db, &email).await?;
    Ok(Json(person.into()))
}

#[utoipa::path(
    post,
    path = "/api/person",
    request_body = PersonInput,
    responses(
        (status = 201, description = "Person created", body = PersonDto),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires ADMIN"),
        (status = 422, description = "Validation failed or email already in use")
    ),
    tag = "Persons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, input))]
pub async fn create_person(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<PersonInput>,
) -> Result<(StatusCode, Json<PersonDto>), AppError> {
    let person = PersonDao::create(&state.db, input).await?;
    record(Event::PersonCreated);

    Ok((StatusCode::CREATED, Json(person.into())))
}

#[utoipa::path(
    put,
    path = "/api/person/{id}",
    params(("id" = i64, Path, description = "Person ID")),
    request_body = PersonInput,
    responses(
        (status = 200, description = "Person updated", body = PersonDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires ADMIN"),
        (status = 404, description = "Person not found"),
        (status = 422, description = "Validation failed or email already in use")
    ),
    tag = "Persons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, input))]
pub async fn update_person(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    ValidatedJson(input): ValidatedJson<PersonInput>,
) -> Result<Json<PersonDto>, AppError> {
    let person = PersonDao::update(&state.db, id, input).await?;
    Ok(Json(person.into()))
}

#[utoipa::path(
    delete,
    path = "/api/person/{id}",
    params(("id" = i64, Path, description = "Person ID")),
    responses(
        (status = 200, description = "The deleted person", body = PersonDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires ADMIN"),
        (status = 404, description = "Person not found")
    ),
    tag = "Persons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_person(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<PersonDto>, AppError> {
    let person = PersonDao::delete(&state.db, id).await?;
    Ok(Json(person.into()))
}
