use crate::config::Config;
use crate::errors::AppError;
use crate::mailer::Mailer;
use crate::models::{LeadRecord, LeadSubmission, MessageResponse};
use crate::notification;
use crate::store::LeadStore;
use crate::validation;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Largest accepted request body. A contact form is a handful of short strings.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Sends the lead notification.
    pub mailer: Arc<dyn Mailer>,
    /// Records leads after the notification went out (optional).
    pub store: Option<Arc<dyn LeadStore>>,
}

/// Build the HTTP router with its middleware stack.
pub fn router(state: Arc<AppState>) -> Router {
    let lead_route = post(submit_lead).fallback(method_not_allowed);

    Router::new()
        .route("/health", get(health))
        .route("/api/send-email", lead_route.clone())
        .route("/api/sendEmail", lead_route)
        .with_state(state)
        // Request size limit: a contact form never needs more than a few KB
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/send-email
///
/// Flow:
/// 1. Validate the submission (400 on the first failing rule).
/// 2. Compose the lead notification.
/// 3. Send it (500 with a generic message on failure).
/// 4. Append the lead to the store, if one is configured.
///
/// Responds 201 when the lead was sent and stored, 200 when it was only sent.
/// A store failure after a successful send is logged and answered with 200,
/// because the notification did go out.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `payload` - JSON body with the contact-form fields.
pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LeadSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(submission) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::MalformedBody(rejection.body_text())
        }
    })?;

    tracing::info!("📨 Received lead submission");

    let lead = validation::validate(&submission)?;

    let email = notification::compose(&lead, &state.config.mail.from, &state.config.mail.to);
    let receipt = state.mailer.send(&email).await?;

    tracing::info!("✅ Lead notification sent: {}", receipt.message_id);

    let Some(store) = &state.store else {
        return Ok((
            StatusCode::OK,
            Json(MessageResponse::new("Email sent successfully")),
        ));
    };

    let record = LeadRecord::new(lead, Utc::now());
    match store.append(&record).await {
        Ok(()) => Ok((
            StatusCode::CREATED,
            Json(MessageResponse::new("Form submitted successfully!")),
        )),
        Err(e) => {
            tracing::error!(
                "⚠️  Lead notification {} sent but not stored: {}",
                receipt.message_id,
                e
            );
            Ok((
                StatusCode::OK,
                Json(MessageResponse::new("Email sent successfully")),
            ))
        }
    }
}

/// Any verb other than POST on the lead endpoint.
pub async fn method_not_allowed(method: Method) -> AppError {
    tracing::warn!("Rejected {} request to lead endpoint", method);
    AppError::MethodNotAllowed
}
