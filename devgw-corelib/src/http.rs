//! Axum extractor wrappers that reject with the gateway error envelope.
//!
//! The default axum rejections answer with plain text bodies. The wrappers
//! here turn every extraction failure into an [`ErrResp::ErrParam`] so the
//! `{"error": string}` contract holds for malformed input as well.

use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};

use crate::err::ErrResp;

/// JSON request body. Replies a 400 error envelope for malformed JSON.
pub struct Json<T>(pub T);

/// Typed path parameters. Replies a 400 error envelope for mismatches.
pub struct Path<T>(pub T);

/// Typed query string. Replies a 400 error envelope for malformed queries.
pub struct Query<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ErrResp;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Err(e) => Err(ErrResp::ErrParam(Some(e.body_text()))),
            Ok(axum::Json(value)) => Ok(Json(value)),
        }
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ErrResp;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Err(e) => Err(ErrResp::ErrParam(Some(e.body_text()))),
            Ok(axum::extract::Path(value)) => Ok(Path(value)),
        }
    }
}

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ErrResp;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Err(e) => Err(ErrResp::ErrParam(Some(e.body_text()))),
            Ok(axum::extract::Query(value)) => Ok(Query(value)),
        }
    }
}

/// Parse a raw query string into key/value pairs, preserving order and
/// duplicates so unknown parameters can be passed through unmodified.
pub fn parse_query_pairs(query: &str) -> Result<Vec<(String, String)>, ErrResp> {
    if query.len() == 0 {
        return Ok(vec![]);
    }
    match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
        Err(e) => Err(ErrResp::ErrParam(Some(format!("parse query error: {}", e)))),
        Ok(pairs) => Ok(pairs),
    }
}
