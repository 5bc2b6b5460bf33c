use crate::app::api::{AppError, AppResult};
use crate::app::error::{ErrorExt, ErrorKind};
use anyhow::{anyhow, Context};
use axum::body;
use axum::extract::{rejection::QueryRejection, Query};
use http::{header, Response, StatusCode};
use serde_derive::{Deserialize, Serialize};

pub mod courses;
pub mod debug;
pub mod noncwid;
pub mod signin;
pub mod spa;

pub const REQUEST_MADE: &str = "request made";

pub async fn healthz() -> &'static str {
    "Ok"
}

/// Body shared by `/signin` and `/noncwidsignin`.
///
/// An empty `errmessage` means the request succeeded.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
pub struct Reply {
    pub message: String,
    pub errmessage: String,
}

impl Reply {
    pub fn ok() -> Self {
        Self {
            message: REQUEST_MADE.to_string(),
            errmessage: String::new(),
        }
    }

    pub fn error(errmessage: impl Into<String>) -> Self {
        Self {
            message: REQUEST_MADE.to_string(),
            errmessage: errmessage.into(),
        }
    }
}

/// Treats an empty query value the same as a missing one.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub fn required(value: Option<String>, name: &'static str) -> Result<String, AppError> {
    present(value)
        .ok_or_else(|| anyhow!("`{}` query parameter is required", name))
        .error(ErrorKind::MissingParameter)
}

/// Unwraps an extracted query, turning a malformed query string into `MissingParameter`.
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(query)| query)
        .map_err(anyhow::Error::from)
        .error(ErrorKind::MissingParameter)
}

pub fn json_response<T: serde::Serialize>(
    status: StatusCode,
    payload: &T,
    what: &str,
) -> AppResult {
    let body = serde_json::to_string(payload)
        .with_context(|| format!("Failed to serialize {}", what))
        .error(ErrorKind::SerializationFailed)?;

    let resp = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body::boxed(body::Full::from(body)))
        .with_context(|| format!("Failed to build response for {}", what))
        .error(ErrorKind::ResponseBuildFailed)?;

    Ok(resp)
}
