//! Failure kinds of the card endpoint.
//!
//! Every variant is answered with a 500. Only configuration problems expose their message;
//! upstream and rendering failures share one generic body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub const GENERIC_FAILURE_BODY: &str = "System Failure";

#[derive(Error, Debug)]
pub enum CardError {
    /// Username or token missing from the environment.
    #[error("{0}")]
    Config(String),

    /// GitHub request failed, or answered with errors or without a user.
    #[error("GitHub API error: {0}")]
    Upstream(String),

    /// The card could not be written. Only a failing `fmt::Write` produces it, and writing
    /// into a `String` does not fail.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<octocrab::Error> for CardError {
    fn from(err: octocrab::Error) -> Self {
        CardError::Upstream(err.to_string())
    }
}

impl From<std::fmt::Error> for CardError {
    fn from(err: std::fmt::Error) -> Self {
        CardError::Render(err.to_string())
    }
}

impl IntoResponse for CardError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Failed to generate stats card");

        let body = match self {
            CardError::Config(message) => message,
            CardError::Upstream(_) | CardError::Render(_) => GENERIC_FAILURE_BODY.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
