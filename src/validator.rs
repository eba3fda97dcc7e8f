//! Request extractors that reject with [`AppError`] instead of axum's
//! plain-text rejections.
//!
//! A body that cannot be deserialized (bad JSON, missing field, wrong type,
//! missing content type) is rejected with 400. A body that deserializes but
//! breaks a validation rule is rejected with 422. A path parameter that does
//! not parse is rejected with 400.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use roster_core::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(anyhow!(describe(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

/// [`Path`] with a JSON error body.
#[derive(Debug, Clone, Copy)]
pub struct PathParam<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(PathParam(value)),
            Err(PathRejection::FailedToDeserializePathParams(err)) => Err(AppError::bad_request(
                anyhow!("Invalid path parameter: {}", err.body_text()),
            )),
            Err(rejection) => Err(AppError::internal_error(rejection.body_text())),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let message = match &rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Missing 'Content-Type: application/json' header".to_string()
        }
        JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON".to_string(),
        JsonRejection::JsonDataError(_) => {
            let detail = rejection.body_text();
            match missing_field(&detail) {
                Some(field) => format!("{} is required", field),
                None => format!("Invalid request body: {}", detail),
            }
        }
        _ => "Invalid request body".to_string(),
    };

    AppError::bad_request(anyhow!(message))
}

fn missing_field(detail: &str) -> Option<&str> {
    detail
        .split("missing field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
}

/// `field: message` pairs in field order, joined with `; `.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: invalid ({})", field, error.code),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 1))]
        name: String,
        #[validate(email)]
        email: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn extract(req: Request) -> Result<ValidatedJson<Sample>, AppError> {
        ValidatedJson::<Sample>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_valid_body() {
        let ValidatedJson(sample) = extract(json_request(r#"{"name":"a","email":"a@b.dk"}"#))
            .await
            .unwrap();
        assert_eq!(sample.name, "a");
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let err = extract(json_request(r#"{"name":"a"}"#)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "email is required");
    }

    #[tokio::test]
    async fn test_syntax_error_is_bad_request() {
        let err = extract(json_request("{not json")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let req = Request::builder()
            .body(Body::from(r#"{"name":"a","email":"a@b.dk"}"#))
            .unwrap();
        let err = extract(req).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unparsable_path_param_is_bad_request() {
        use axum::{Router, routing::get};
        use http_body_util::BodyExt;
        use tower::ServiceExt;

        async fn show(PathParam(id): PathParam<i64>) -> String {
            id.to_string()
        }

        let app = Router::new().route("/items/{id}", get(show));

        let ok = app
            .clone()
            .oneshot(Request::builder().uri("/items/42").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/items/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("Invalid path parameter")
        );
    }

    #[tokio::test]
    async fn test_rule_violation_is_unprocessable() {
        let err = extract(json_request(r#"{"name":"","email":"nope"}"#))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.message().starts_with("email: "));
        assert!(err.message().contains("name: "));
    }
}
