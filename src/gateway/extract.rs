//! Ingress validation
//!
//! `ValidatedJson<T>` decodes the body and runs `validator` rules before the
//! handler sees it, so handlers never receive malformed input. `FormBody<T>`
//! and `QueryParams<T>` wrap axum's `Form` and `Query` so their rejections
//! come back in the `ApiResponse` envelope instead of plain text.

use axum::{
    Form, Json,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{FormRejection, JsonRejection, QueryRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::types::ApiError;

#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value): Json<T> =
            Json::from_request(req, state)
                .await
                .map_err(|e: JsonRejection| match e {
                    JsonRejection::JsonDataError(e) => ApiError::validation(e.body_text()),
                    other => ApiError::bad_request(other.body_text()),
                })?;

        value
            .validate()
            .map_err(|e| ApiError::validation(e.to_string()))?;

        Ok(ValidatedJson(value))
    }
}

/// Url-encoded form body. Undecodable fields are 422, a wrong content type
/// or unreadable body is 400.
#[derive(Debug)]
pub struct FormBody<T>(pub T);

impl<S, T> FromRequest<S> for FormBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value): Form<T> =
            Form::from_request(req, state)
                .await
                .map_err(|e: FormRejection| match e {
                    FormRejection::FailedToDeserializeFormBody(e) => {
                        ApiError::validation(e.body_text())
                    }
                    other => ApiError::bad_request(other.body_text()),
                })?;
        Ok(FormBody(value))
    }
}

/// Query string parameters; any decode failure is 400.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value): Query<T> = Query::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| ApiError::bad_request(e.body_text()))?;
        Ok(QueryParams(value))
    }
}
