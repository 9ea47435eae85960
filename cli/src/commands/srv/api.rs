//! # Site API
//!
//! File: cli/src/commands/srv/api.rs
//!
//! ## Overview
//!
//! JSON endpoints the site's widgets call:
//!
//! | Route             | Success                                     | Failure                                  |
//! |-------------------|---------------------------------------------|------------------------------------------|
//! | `POST /api/chat`  | `200 {"reply": "..."}`                      | `400 {"error": "..."}` on a blank message |
//! | `POST /api/leads` | `202 {"status": "submitted", "notice": ..}` | `422` invalid, `502` sink failure         |
//!
//! Replies are returned immediately; the typing delay is a widget concern.
//! Every lead request gets its own `LeadForm`, so the one-in-flight rule applies
//! per request while the intake sink is shared.
//!
use crate::common::chat::Responder;
use crate::common::lead::{create_submitter, FieldErrors, LeadFields, LeadForm, LeadSubmitter, SubmitOutcome};
use crate::common::notify::{CollectingNotifier, Notification};
use crate::core::config::Config;
use crate::core::error::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub responder: Arc<Responder>,
    pub submitter: Arc<dyn LeadSubmitter>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            responder: Arc::new(Responder::from_config(&config.chat)),
            submitter: create_submitter(&config.lead)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    Submitted,
    Invalid,
    Failed,
    Busy,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadResponse {
    pub status: LeadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notification>,
}

/// Routes under `/api`, bound to `state`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/leads", post(lead_handler))
        .with_state(state)
}

async fn chat_handler(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    if request.message.trim().is_empty() {
        debug!("Rejected blank chat message");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "message must not be blank".to_string(),
            }),
        )
            .into_response();
    }

    let reply = state.responder.respond(&request.message).to_string();
    Json(ChatResponse { reply }).into_response()
}

async fn lead_handler(State(state): State<AppState>, Json(fields): Json<LeadFields>) -> Response {
    let notifier = Arc::new(CollectingNotifier::new());
    let form = LeadForm::new(state.submitter.clone(), notifier.clone());
    if let Err(e) = form.set_fields(fields) {
        // A fresh form is never mid-submit.
        warn!("Could not fill lead form: {}", e);
        return lead_response(StatusCode::CONFLICT, LeadStatus::Busy, None, None);
    }

    match form.submit().await {
        SubmitOutcome::Submitted => {
            info!("Lead accepted via API");
            lead_response(StatusCode::ACCEPTED, LeadStatus::Submitted, None, notifier.last())
        }
        SubmitOutcome::Invalid(errors) => {
            debug!(fields = %errors.field_list(), "Lead rejected by validation");
            lead_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                LeadStatus::Invalid,
                Some(errors),
                None,
            )
        }
        SubmitOutcome::Failed => {
            lead_response(StatusCode::BAD_GATEWAY, LeadStatus::Failed, None, notifier.last())
        }
        SubmitOutcome::Busy => lead_response(StatusCode::CONFLICT, LeadStatus::Busy, None, None),
    }
}

fn lead_response(
    code: StatusCode,
    status: LeadStatus,
    field_errors: Option<FieldErrors>,
    notice: Option<Notification>,
) -> Response {
    (
        code,
        Json(LeadResponse {
            status,
            field_errors,
            notice,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::lead::sinks::{OutboxSubmitter, SubmissionError};
    use crate::common::lead::validate::LeadSubmission;
    use crate::common::lead::form::{FAILURE_NOTICE, SUCCESS_NOTICE};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct RejectingSubmitter;

    #[async_trait]
    impl LeadSubmitter for RejectingSubmitter {
        async fn submit_lead(
            &self,
            _lead: &LeadSubmission,
        ) -> std::result::Result<(), SubmissionError> {
            Err(SubmissionError::new("intake offline"))
        }
    }

    fn state_with(submitter: Arc<dyn LeadSubmitter>) -> AppState {
        AppState {
            responder: Arc::new(Responder::default()),
            submitter,
        }
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    fn valid_lead() -> Value {
        json!({
            "name": "Ada Lovelace",
            "email": "ada@example.org",
            "company": "Analytical Engines",
            "message": "25 seats of Adobe Creative Cloud, 8 months left"
        })
    }

    #[tokio::test]
    async fn test_chat_returns_keyword_reply() {
        let app = api_router(AppState::from_config(&Config::default()).unwrap());
        let (status, body) =
            post_json(app, "/api/chat", json!({ "message": "How do I sell my license?" })).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["reply"]
            .as_str()
            .unwrap()
            .starts_with("To sell your license"));
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_message() {
        let app = api_router(AppState::from_config(&Config::default()).unwrap());
        let (status, body) = post_json(app, "/api/chat", json!({ "message": "   " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_lead_submitted_to_outbox() {
        let outbox = TempDir::new().unwrap();
        let app = api_router(state_with(Arc::new(OutboxSubmitter::new(outbox.path()))));

        let (status, body) = post_json(app, "/api/leads", valid_lead()).await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body["status"], "submitted");
        assert_eq!(body["notice"]["kind"], "success");
        assert_eq!(body["notice"]["message"], SUCCESS_NOTICE);
        assert_eq!(std::fs::read_dir(outbox.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_lead_invalid_reports_field_errors() {
        let outbox = TempDir::new().unwrap();
        let app = api_router(state_with(Arc::new(OutboxSubmitter::new(outbox.path()))));

        let (status, body) = post_json(
            app,
            "/api/leads",
            json!({ "name": "Ada", "email": "not-an-email" }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], "invalid");
        assert_eq!(body["fieldErrors"]["email"], "Please enter a valid email address.");
        assert_eq!(
            body["fieldErrors"]["message"],
            "Please describe the license you want to sell."
        );
        assert!(body["fieldErrors"].get("name").is_none());
        assert!(body.get("notice").is_none());
        assert_eq!(std::fs::read_dir(outbox.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_lead_sink_failure_is_bad_gateway() {
        let app = api_router(state_with(Arc::new(RejectingSubmitter)));
        let (status, body) = post_json(app, "/api/leads", valid_lead()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], "failed");
        assert_eq!(body["notice"]["kind"], "error");
        assert_eq!(body["notice"]["message"], FAILURE_NOTICE);
    }
}
