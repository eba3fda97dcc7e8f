//! Application error type.
//!
//! Every fallible handler, DAO function and middleware in Roster returns
//! [`AppError`]. It pairs an HTTP status with an [`anyhow::Error`] and renders
//! as a JSON body of the form `{"error": "<message>"}`.
//!
//! | Constructor            | Status |
//! |------------------------|--------|
//! | [`AppError::bad_request`]   | 400 |
//! | [`AppError::unauthorized`]  | 401 |
//! | [`AppError::forbidden`]     | 403 |
//! | [`AppError::not_found`]     | 404 |
//! | [`AppError::unprocessable`] | 422 |
//! | [`AppError::internal`]      | 500 |
//!
//! Any error convertible into [`anyhow::Error`] (including `sqlx::Error`)
//! converts into a 500 through `?`.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new(status: StatusCode, err: impl Into<Error>) -> Self {
        Self {
            status,
            error: err.into(),
        }
    }

    fn with_message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, Error::msg(message.into()))
    }

    pub fn bad_request(err: impl Into<Error>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(err: impl Into<Error>) -> Self {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable(err: impl Into<Error>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn internal(err: impl Into<Error>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// The client-facing message.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }

        let body = json!({ "error": self.message() });
        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_constructors_set_status() {
        assert_eq!(
            AppError::unauthorized("x").status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::forbidden("x").status, StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::not_found(anyhow::anyhow!("x")).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::unprocessable(anyhow::anyhow!("x")).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::bad_request(anyhow::anyhow!("x")).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::internal_error("x").status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_question_mark_conversion_is_internal() {
        fn fails() -> Result<(), AppError> {
            Err(std::io::Error::other("disk on fire"))?;
            Ok(())
        }

        let err = fails().unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "disk on fire");
    }

    #[tokio::test]
    async fn test_into_response_renders_error_body() {
        let response = AppError::not_found(anyhow::anyhow!("No person with id: 7")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "No person with id: 7");
    }
}
