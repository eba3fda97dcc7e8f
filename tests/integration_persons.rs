mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use sqlx::PgPool;

use common::{login, seed_users, send, test_app};

fn person_body(first_name: &str, email: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "Jensen",
        "email": email,
        "birthDate": "1990-04-12"
    })
}

async fn admin_app(pool: PgPool) -> (axum::Router, String) {
    seed_users(&pool).await;
    let app = test_app(pool);
    let token = login(&app, "admin", "admin123").await;
    (app, token)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_is_public(pool: PgPool) {
    let (app, token) = admin_app(pool).await;

    let (status, _) = send(&app, Method::GET, "/api/person/resetdata", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/api/person", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let persons = body.as_array().unwrap();
    assert_eq!(persons.len(), 3);
    assert_eq!(persons[0]["firstName"], "Hans");
    assert_eq!(persons[0]["lastName"], "Hansen");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reset_data_requires_admin(pool: PgPool) {
    seed_users(&pool).await;
    let app = test_app(pool);
    let token = login(&app, "user", "user123").await;

    let (status, _) = send(&app, Method::GET, "/api/person/resetdata", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/person/resetdata", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reset_data_message(pool: PgPool) {
    let (app, token) = admin_app(pool).await;

    let (status, body) = send(&app, Method::GET, "/api/person/resetdata", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Data reset");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_then_get(pool: PgPool) {
    let (app, token) = admin_app(pool).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/person",
        Some(&token),
        Some(person_body("Karen", "karen@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/person/{id}"), None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["firstName"], "Karen");
    assert_eq!(fetched["birthDate"], "1990-04-12");

    let (status, by_email) = send(
        &app,
        Method::GET,
        "/api/person/email/karen@example.com",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_email["id"], id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_requires_admin(pool: PgPool) {
    seed_users(&pool).await;
    let app = test_app(pool);
    let token = login(&app, "user", "user123").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/person",
        None,
        Some(person_body("Nope", "nope@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authorization header is missing");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/person",
        Some(&token),
        Some(person_body("Nope", "nope@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "User was not authorized with roles: [user]. Needed roles are: [ADMIN]"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_rejections(pool: PgPool) {
    let (app, token) = admin_app(pool).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/person",
        Some(&token),
        Some(person_body("First", "dup@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/person",
        Some(&token),
        Some(person_body("Second", "dup@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "A person with email dup@example.com already exists");

    let tomorrow = (Utc::now().date_naive() + Duration::days(2)).to_string();
    let mut future = person_body("Future", "future@example.com");
    future["birthDate"] = json!(tomorrow);
    let (status, _) = send(&app, Method::POST, "/api/person", Some(&token), Some(future)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/person",
        Some(&token),
        Some(json!({ "firstName": "Only" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().ends_with("is required"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_persists(pool: PgPool) {
    let (app, token) = admin_app(pool).await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/person",
        Some(&token),
        Some(person_body("Old", "rename@example.com")),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/person/{id}"),
        Some(&token),
        Some(person_body("New", "rename@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["firstName"], "New");

    let (_, fetched) = send(&app, Method::GET, &format!("/api/person/{id}"), None, None).await;
    assert_eq!(fetched["firstName"], "New");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_person(pool: PgPool) {
    let (app, token) = admin_app(pool).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/person/999999999",
        Some(&token),
        Some(person_body("Ghost", "ghost@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No person with id: 999999999");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_removes_exactly_one(pool: PgPool) {
    let (app, token) = admin_app(pool).await;
    send(&app, Method::GET, "/api/person/resetdata", Some(&token), None).await;

    let (_, before) = send(&app, Method::GET, "/api/person", None, None).await;
    let before = before.as_array().unwrap().clone();
    let id = before[0]["id"].as_i64().unwrap();

    let (status, deleted) = send(
        &app,
        Method::DELETE,
        &format!("/api/person/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, before[0]);

    let (_, after) = send(&app, Method::GET, "/api/person", None, None).await;
    assert_eq!(after.as_array().unwrap().len(), before.len() - 1);

    let (status, body) = send(&app, Method::GET, &format!("/api/person/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], format!("No person with id: {id}"));

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/person/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_by_unknown_email(pool: PgPool) {
    let app = test_app(pool);

    let (status, body) = send(&app, Method::GET, "/api/person/email/nobody@example.com", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No person with email: nobody@example.com");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_overlong_email_is_unprocessable(pool: PgPool) {
    let (app, token) = admin_app(pool).await;
    let label = "a".repeat(60);
    let email = format!("{}@{label}.{label}.{label}.{label}.dk", "b".repeat(60));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/person",
        Some(&token),
        Some(person_body("Long", &email)),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().starts_with("email:"));

    let (_, all) = send(&app, Method::GET, "/api/person", None, None).await;
    assert!(all.as_array().unwrap().iter().all(|p| p["email"] != email.as_str()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_to_taken_email(pool: PgPool) {
    let (app, token) = admin_app(pool).await;

    send(
        &app,
        Method::POST,
        "/api/person",
        Some(&token),
        Some(person_body("Anna", "anna@example.com")),
    )
    .await;
    let (_, bo) = send(
        &app,
        Method::POST,
        "/api/person",
        Some(&token),
        Some(person_body("Bo", "bo@example.com")),
    )
    .await;
    let id = bo["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/person/{id}"),
        Some(&token),
        Some(person_body("Bo", "anna@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"],
        "A person with email anna@example.com already exists"
    );

    let (_, unchanged) = send(&app, Method::GET, &format!("/api/person/{id}"), None, None).await;
    assert_eq!(unchanged["email"], "bo@example.com");
}
