//! REST + WebSocket endpoints that let a host UI drive the wizard.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::error::SubmissionError;

use super::manager::OnboardingManager;
use super::state::Transition;
use super::update::{Choice, FieldUpdate, ListField};

/// Shared state for onboarding routes.
#[derive(Clone)]
pub struct OnboardingRouteState {
    pub manager: Arc<OnboardingManager>,
}

/// Build the onboarding routes.
pub fn onboarding_routes(state: OnboardingRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/onboarding/status", get(get_status))
        .route("/api/onboarding/update", post(update_field))
        .route("/api/onboarding/toggle", post(toggle_value))
        .route("/api/onboarding/choose", post(choose_value))
        .route("/api/onboarding/next", post(next_step))
        .route("/api/onboarding/previous", post(previous_step))
        .route("/api/onboarding/complete", post(complete))
        .route("/api/onboarding/reset", post(reset))
        .route("/ws/onboarding", get(ws_handler))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "wellness-onboarding"
    }))
}

/// GET /api/onboarding/status
async fn get_status(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    Json(state.manager.get_status().await)
}

/// POST /api/onboarding/update — `{"field": "sleepSchedule.bedtime", "value": "22:00"}`
async fn update_field(
    State(state): State<OnboardingRouteState>,
    Json(update): Json<FieldUpdate>,
) -> impl IntoResponse {
    match state.manager.update(update).await {
        Ok(_) => Json(state.manager.get_status().await).into_response(),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
struct ToggleRequest {
    field: ListField,
    value: String,
}

/// POST /api/onboarding/toggle — `{"field": "musicGenres", "value": "Jazz"}`
async fn toggle_value(
    State(state): State<OnboardingRouteState>,
    Json(body): Json<ToggleRequest>,
) -> impl IntoResponse {
    state.manager.toggle(body.field, &body.value).await;
    Json(state.manager.get_status().await)
}

/// POST /api/onboarding/choose — `{"field": "therapyExperience", "value": "None"}`
async fn choose_value(
    State(state): State<OnboardingRouteState>,
    Json(choice): Json<Choice>,
) -> impl IntoResponse {
    state.manager.choose(choice).await;
    Json(state.manager.get_status().await)
}

/// POST /api/onboarding/next
///
/// 200 with the new step, or 422 with every validation error.
async fn next_step(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    let transition = state.manager.next().await;
    let status = match transition {
        Transition::Blocked { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        Transition::Advanced { .. } | Transition::AtFinalStep => StatusCode::OK,
    };
    (status, Json(transition))
}

/// POST /api/onboarding/previous
async fn previous_step(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    let moved = state.manager.previous().await.is_some();
    let step = state.manager.current_step().await;
    Json(serde_json::json!({"moved": moved, "step": step}))
}

/// POST /api/onboarding/complete
async fn complete(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    match state.manager.complete().await {
        Ok(response) => (StatusCode::OK, Json(serde_json::json!(response))),
        Err(e) => {
            let status = match e {
                SubmissionError::NotAtFinalStep | SubmissionError::AlreadySubmitting => {
                    StatusCode::CONFLICT
                }
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, Json(serde_json::json!({"error": e.user_message()})))
        }
    }
}

/// POST /api/onboarding/reset
async fn reset(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    state.manager.reset().await;
    Json(state.manager.get_status().await)
}

// ── WebSocket ───────────────────────────────────────────────────────────

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<OnboardingRouteState>,
) -> impl IntoResponse {
    info!("Notice WebSocket client connecting");
    ws.on_upgrade(|socket| handle_socket(socket, state.manager))
}

async fn handle_socket(mut socket: WebSocket, manager: Arc<OnboardingManager>) {
    let mut rx = manager.subscribe();

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(notice) => {
                        if let Ok(json) = serde_json::to_string(&notice) {
                            if socket.send(Message::Text(json.into())).await.is_err() {
                                debug!("Client disconnected during send");
                                break;
                            }
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        warn!(missed = n, "Notice client lagged behind broadcast");
                    }
                    Err(RecvError::Closed) => {
                        debug!("Notice channel closed");
                        break;
                    }
                }
            }

            result = socket.recv() => {
                match result {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Notice WebSocket client disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "WebSocket error");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::backend::{OnboardingResponse, ProfileService};
    use crate::onboarding::ProfileDraft;

    struct AlwaysOk;

    #[async_trait]
    impl ProfileService for AlwaysOk {
        async fn complete_onboarding(
            &self,
            _draft: &ProfileDraft,
        ) -> Result<OnboardingResponse, SubmissionError> {
            Ok(OnboardingResponse {
                message: None,
                user: serde_json::json!({}),
            })
        }
    }

    fn app() -> Router {
        onboarding_routes(OnboardingRouteState {
            manager: Arc::new(OnboardingManager::new(Arc::new(AlwaysOk), None)),
        })
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let req = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn status_starts_on_step_one() {
        let app = app();
        let (status, json) = send(&app, "GET", "/api/onboarding/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["step"], "basic_info");
        assert_eq!(json["stepNumber"], 1);
        assert_eq!(json["totalSteps"], 6);
        assert_eq!(json["draft"]["stressLevel"], 5);
    }

    #[tokio::test]
    async fn update_with_dot_path() {
        let app = app();
        let (status, json) = send(
            &app,
            "POST",
            "/api/onboarding/update",
            Some(r#"{"field":"sleepSchedule.wakeTime","value":"07:15"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["draft"]["sleepSchedule"]["wakeTime"], "07:15");
        assert_eq!(json["draft"]["sleepSchedule"]["bedtime"], "");
    }

    #[tokio::test]
    async fn unknown_field_is_rejected() {
        let app = app();
        let (status, _) = send(
            &app,
            "POST",
            "/api/onboarding/update",
            Some(r#"{"field":"shoeSize","value":"9"}"#),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn blocked_next_is_422_with_errors() {
        let app = app();
        send(&app, "POST", "/api/onboarding/next", None).await;
        let (status, json) = send(&app, "POST", "/api/onboarding/next", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["result"], "blocked");
        assert_eq!(json["errors"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn toggle_and_choose_flow() {
        let app = app();
        let (_, json) = send(
            &app,
            "POST",
            "/api/onboarding/toggle",
            Some(r#"{"field":"primaryConcerns","value":"Stress"}"#),
        )
        .await;
        assert_eq!(json["draft"]["primaryConcerns"][0], "Stress");

        let body = r#"{"field":"therapyExperience","value":"None"}"#;
        let (_, json) = send(&app, "POST", "/api/onboarding/choose", Some(body)).await;
        assert_eq!(json["draft"]["therapyExperience"], "None");
        let (_, json) = send(&app, "POST", "/api/onboarding/choose", Some(body)).await;
        assert_eq!(json["draft"]["therapyExperience"], "");
    }

    #[tokio::test]
    async fn complete_before_final_step_conflicts() {
        let app = app();
        let (status, json) = send(&app, "POST", "/api/onboarding/complete", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(json["error"].as_str().unwrap().contains("final step"));
    }

    #[tokio::test]
    async fn previous_reports_whether_it_moved() {
        let app = app();
        let (_, json) = send(&app, "POST", "/api/onboarding/previous", None).await;
        assert_eq!(json["moved"], false);
        send(&app, "POST", "/api/onboarding/next", None).await;
        let (_, json) = send(&app, "POST", "/api/onboarding/previous", None).await;
        assert_eq!(json["moved"], true);
        assert_eq!(json["step"], "basic_info");
    }
}
