#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use trener_ai::{AiError, ChatCompletion, ChatRequest, LlmClient, ToolCall};
use trener_api::config::ServerConfig;
use trener_api::router::build_app_router;
use trener_api::state::AppState;
use trener_notify::{MatrixConfig, MatrixNotifier};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Scripted model
// ---------------------------------------------------------------------------

/// An [`LlmClient`] that replays queued answers and records every request.
/// Once the queue is empty it fails as an unconfigured provider would.
#[derive(Default)]
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<ChatCompletion, AiError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.push(Ok(ChatCompletion {
            content: Some(text.to_string()),
            ..Default::default()
        }))
    }

    pub fn tool_call(self, name: &str, arguments: serde_json::Value) -> Self {
        self.push(Ok(ChatCompletion {
            tool_calls: vec![ToolCall {
                id: format!("call_{name}"),
                name: name.to_string(),
                arguments,
            }],
            ..Default::default()
        }))
    }

    pub fn failure(self) -> Self {
        self.push(Err(AiError::HttpStatus {
            status: 503,
            message: "unavailable".to_string(),
        }))
    }

    fn push(self, reply: Result<ChatCompletion, AiError>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, AiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(AiError::NotConfigured))
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

fn unconfigured_notifier() -> MatrixNotifier {
    MatrixNotifier::new(MatrixConfig {
        homeserver: "https://matrix.example.org".to_string(),
        access_token: None,
        room_id: None,
    })
    .unwrap()
}

/// Build the full application router, with the production middleware stack,
/// around `pool` and a scripted model.
pub fn build_test_app_with_llm(pool: SqlitePool, llm: Arc<ScriptedLlm>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        llm,
        notifier: Arc::new(unconfigured_notifier()),
    };
    build_app_router(state, &config)
}

/// Build the app with a model that fails every call.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_with_llm(pool, Arc::new(ScriptedLlm::new()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn put(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::PUT, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
