use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;

use crate::mailer::DispatchError;
use crate::models::MessageResponse;
use crate::validation::ValidationError;

/// Application-specific error types.
#[derive(Debug)]
pub enum AppError {
    /// Submission failed a validation rule.
    Validation(ValidationError),
    /// Request body was not a JSON lead submission.
    MalformedBody(String),
    /// Request body exceeded the size limit.
    PayloadTooLarge,
    /// Wrong HTTP verb on the lead endpoint.
    MethodNotAllowed,
    /// Mail server rejected or never received the notification.
    Dispatch(DispatchError),
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "Validation error: {}", e),
            AppError::MalformedBody(msg) => write!(f, "Malformed body: {}", msg),
            AppError::PayloadTooLarge => write!(f, "Payload too large"),
            AppError::MethodNotAllowed => write!(f, "Method not allowed"),
            AppError::Dispatch(e) => write!(f, "Dispatch error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Every body has the shape `{"message": ...}`. Server-side failures are
    /// logged in full and answered with a generic message.
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(e) => {
                tracing::warn!("Rejected lead submission: {}", e);
                (StatusCode::BAD_REQUEST, e.message().to_string())
            }
            AppError::MalformedBody(msg) => {
                tracing::warn!("Malformed lead submission: {}", msg);
                (StatusCode::BAD_REQUEST, "Invalid request body".to_string())
            }
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large".to_string(),
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            AppError::Dispatch(e) => {
                tracing::error!("Error sending email: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error sending email".to_string(),
                )
            }
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        AppError::Dispatch(err)
    }
}
