use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use crate::models::ErrorBody;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY must be set")]
    MissingApiKey,

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed provider response: {0}")]
    Decode(String)
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("prompt must be a non-empty string")]
    EmptyPrompt,

    #[error(transparent)]
    Provider(#[from] ClientError)
}

/// Errors that reach the route boundary, rendered as `{"error": message}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String)
}

impl AppError {

    // `task` names the endpoint so 500 messages say what failed
    pub fn from_task(task: &str, error: TaskError) -> Self {

        match error {
            TaskError::EmptyPrompt => AppError::BadRequest(error.to_string()),
            TaskError::Provider(cause) => AppError::Internal(format!("{} failed: {}", task, cause))
        }

    }

    pub fn status(&self) -> StatusCode {

        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR
        }

    }

}

impl IntoResponse for AppError {

    fn into_response(self) -> Response {

        let status = self.status();
        (status, Json(ErrorBody { error: self.to_string() })).into_response()

    }

}
