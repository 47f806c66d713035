//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` works like `axum::Json<T>`, but additionally runs
//! `validator::Validate::validate()` on the deserialized value. Failures
//! render through [`ApiError`] so clients always get the same envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::Validate;

use super::ApiError;

/// An extractor that deserializes JSON and validates it.
///
/// ```ignore
/// async fn handler(ValidatedJson(body): ValidatedJson<CreateBookingRequest>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Error type for `ValidatedJson` extraction failures.
pub enum ValidatedJsonRejection {
    /// Body missing, not JSON, or wrong shape: 400.
    JsonError(JsonRejection),
    /// Field constraints violated: 422.
    ValidationError(validator::ValidationErrors),
}

impl From<ValidatedJsonRejection> for ApiError {
    fn from(rejection: ValidatedJsonRejection) -> Self {
        match rejection {
            ValidatedJsonRejection::JsonError(rejection) => {
                let mut err = ApiError::bad_request(format!("Invalid JSON: {}", rejection.body_text()));
                err.details = Some(json!({ "code": "INVALID_JSON" }));
                err
            }
            ValidatedJsonRejection::ValidationError(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errs)| {
                        errs.iter().map(move |e| {
                            let msg = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string());
                            format!("{}: {}", field, msg)
                        })
                    })
                    .collect();
                fields.sort();

                let message = if fields.is_empty() {
                    "Validation failed".to_string()
                } else {
                    fields.join("; ")
                };

                let mut err = ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, message);
                err.details = Some(json!({ "code": "VALIDATION_ERROR" }));
                err
            }
        }
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct SlotBody {
        #[validate(range(min = 1))]
        station_id: i64,
        #[allow(dead_code)]
        slots: Vec<i32>,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<SlotBody>) -> &'static str {
        "ok"
    }

    async fn post_json(body: &str) -> StatusCode {
        let app = Router::new().route("/test", post(handler));
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        app.oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        assert_eq!(post_json(r#"{"station_id": 3, "slots": [1, 2]}"#).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        assert_eq!(post_json("not json").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_field_type_returns_400() {
        assert_eq!(
            post_json(r#"{"station_id": 3, "slots": "ten"}"#).await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn validation_failure_returns_422() {
        assert_eq!(
            post_json(r#"{"station_id": 0, "slots": []}"#).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
