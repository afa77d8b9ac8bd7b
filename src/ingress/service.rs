//! # The ingress service.
//!
//! [`IngressService`] owns the bound listener and the axum router for the
//! single `POST /notify` route. Binding happens in [`IngressService::bind`],
//! *before* the supervisor spawns the serving task, so that a port conflict
//! is a startup error with a non-zero exit instead of a silent dead task.
//!
//! ## Request handling
//! ```text
//! body bytes ──► serde_json parse ──ok──► NotifyBody
//!                      │                      │ defaults from Config
//!                      └─err─► ParseFallback  ▼
//!                              event,     NotificationRequest ──► enqueue
//!                              empty body                          │
//!                                             200 {"status":"enqueued"}
//!                                             500 {"status":"error",...} (queue closed)
//! ```
//!
//! Malformed bodies are tolerated, not rejected: any parse failure falls
//! back to an all-defaults request. The only failure path the caller can
//! observe is a closed queue.
//!
//! CORS allows all origins; the only expected clients are local pages,
//! including `file://` ones. This is a local-trust-boundary decision, not a
//! security control.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};
use crate::notify::{NotificationRequest, NotifyBody};
use crate::queue::NotificationQueue;

/// Shared state for the `/notify` handler.
#[derive(Clone)]
struct IngressState {
    queue: NotificationQueue,
    bus: Bus,
    cfg: Arc<Config>,
}

/// Acknowledgement body for an accepted request.
#[derive(Serialize)]
struct Ack {
    status: &'static str,
}

/// Error body for a failed enqueue.
#[derive(Serialize)]
struct Failure {
    status: &'static str,
    error: String,
}

/// HTTP listener that feeds the notification queue.
pub struct IngressService {
    listener: TcpListener,
    router: Router,
    bus: Bus,
    local_addr: std::net::SocketAddr,
}

impl IngressService {
    /// Binds the configured address and prepares the router.
    ///
    /// Fails with [`RuntimeError::Bind`] when the address is unavailable
    /// (typically: port already bound).
    pub async fn bind(
        cfg: Arc<Config>,
        queue: NotificationQueue,
        bus: Bus,
    ) -> Result<Self, RuntimeError> {
        let addr = cfg.bind_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| RuntimeError::Bind { addr, source })?;
        let local_addr = listener.local_addr().unwrap_or(addr);
        let router = router(IngressState {
            queue,
            bus: bus.clone(),
            cfg,
        });
        Ok(Self {
            listener,
            router,
            bus,
            local_addr,
        })
    }

    /// Returns the address the listener actually bound (useful with port 0).
    pub fn local_addr(&self) -> std::net::SocketAddr {
        self.local_addr
    }

    /// Serves until `token` is cancelled, then stops accepting connections
    /// and lets in-flight requests complete.
    ///
    /// Runs on its own task; the supervisor observes the outcome only
    /// through the bus and through the producer handle dropping (which
    /// closes the queue).
    pub async fn run(self, token: CancellationToken) {
        self.bus
            .publish(Event::now(EventKind::IngressStarted).with_addr(self.local_addr));

        let served = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(token.cancelled_owned())
            .await;

        let stopped = Event::now(EventKind::IngressStopped);
        match served {
            Ok(()) => self.bus.publish(stopped),
            Err(e) => self.bus.publish(stopped.with_reason(e.to_string())),
        }
    }
}

/// Builds the one-route router. Split out so tests can drive it directly.
fn router(state: IngressState) -> Router {
    Router::new()
        .route("/notify", post(notify))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `POST /notify`: best-effort parse, default substitution, one enqueue.
async fn notify(State(state): State<IngressState>, body: Bytes) -> Response {
    let parsed = match serde_json::from_slice::<NotifyBody>(&body) {
        Ok(parsed) => parsed,
        Err(e) => {
            // Tolerated: an unparseable body becomes an all-defaults request.
            state
                .bus
                .publish(Event::now(EventKind::ParseFallback).with_reason(e.to_string()));
            NotifyBody::default()
        }
    };

    let request = NotificationRequest::from_body(parsed, &state.cfg);
    let title = request.title.clone();

    match state.queue.enqueue(request) {
        Ok(()) => {
            state
                .bus
                .publish(Event::now(EventKind::RequestAccepted).with_title(title));
            (StatusCode::OK, Json(Ack { status: "enqueued" })).into_response()
        }
        Err(e) => {
            state
                .bus
                .publish(Event::now(EventKind::EnqueueFailed).with_reason(e.to_string()));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Failure {
                    status: "error",
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::queue::{self, QueueReceiver};

    fn test_router() -> (Router, QueueReceiver) {
        let (queue, rx) = queue::unbounded();
        let state = IngressState {
            queue,
            bus: Bus::new(16),
            cfg: Arc::new(Config::default()),
        };
        (router(state), rx)
    }

    fn post_notify(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/notify")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_is_enqueued_verbatim() {
        let (app, mut rx) = test_router();
        let response = app
            .oneshot(post_notify(r#"{"title":"Build","message":"Done"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"status": "enqueued"})
        );

        let item = rx.dequeue().await.unwrap();
        assert_eq!(item.title, "Build");
        assert_eq!(item.message, "Done");
    }

    #[tokio::test]
    async fn test_empty_object_gets_defaults() {
        let (app, mut rx) = test_router();
        let response = app.oneshot(post_notify("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let item = rx.dequeue().await.unwrap();
        let cfg = Config::default();
        assert_eq!(item.title, cfg.default_title);
        assert_eq!(item.message, cfg.default_message);
        assert_eq!(item.app_id, cfg.app_id);
    }

    #[tokio::test]
    async fn test_malformed_body_is_tolerated() {
        let (app, mut rx) = test_router();
        let response = app.oneshot(post_notify("this is not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"status": "enqueued"})
        );
        let item = rx.dequeue().await.unwrap();
        assert_eq!(item.title, Config::default().default_title);
    }

    #[tokio::test]
    async fn test_wrong_typed_field_falls_back_to_defaults() {
        let (app, mut rx) = test_router();
        let response = app.oneshot(post_notify(r#"{"title":42}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let item = rx.dequeue().await.unwrap();
        assert_eq!(item.title, Config::default().default_title);
    }

    #[tokio::test]
    async fn test_closed_queue_surfaces_as_server_error() {
        let (queue, rx) = queue::unbounded();
        drop(rx);
        let state = IngressState {
            queue,
            bus: Bus::new(16),
            cfg: Arc::new(Config::default()),
        };
        let app = router(state);

        let response = app
            .oneshot(post_notify(r#"{"title":"Build"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert!(body["error"].as_str().unwrap().contains("closed"));
    }

    #[tokio::test]
    async fn test_exactly_one_enqueue_per_request() {
        let (app, mut rx) = test_router();
        let _ = app
            .oneshot(post_notify(r#"{"title":"once"}"#))
            .await
            .unwrap();

        assert_eq!(rx.dequeue().await.unwrap().title, "once");
        // Producer handles still alive inside the dropped router state were
        // released with it, so the queue is now closed and empty.
        assert!(rx.dequeue().await.is_none());
    }
}
