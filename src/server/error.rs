// src/server/error.rs

use serde::Serialize;
use thiserror::Error;
use tracing::error;
use warp::http::StatusCode;
use warp::{reject, Rejection, Reply};

/// A request the caller got wrong. Rendered as `{"error": message}` with
/// transport status 200 — callers read the body, not the status line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Unauthorized. Invalid shared_secret.")]
    SharedSecret,
    #[error("Bad request. Invalid {0}.")]
    Field(&'static str),
    #[error("Bad request. Invalid start_date and/or end_date.")]
    Dates,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn into_reply(self) -> warp::reply::Json {
        warp::reply::json(&ErrorBody {
            error: self.to_string(),
        })
    }
}

/// A failure talking to the backing sheet (or a misprovisioned sheet).
/// Unlike request errors these surface as HTTP 500.
#[derive(Debug)]
pub struct StoreFault(pub anyhow::Error);

impl reject::Reject for StoreFault {}

pub fn store_fault(err: anyhow::Error) -> Rejection {
    reject::custom(StoreFault(err))
}

/// Map store faults to a 500 JSON body; anything else stays with warp.
pub async fn recover(rejection: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(StoreFault(err)) = rejection.find::<StoreFault>() {
        error!(error = ?err, "request failed against the backing sheet");
        let body = warp::reply::json(&ErrorBody {
            error: "internal error".to_string(),
        });
        return Ok(warp::reply::with_status(body, StatusCode::INTERNAL_SERVER_ERROR));
    }
    Err(rejection)
}
