//! In-process OpenAI-compatible mock server.

#![allow(dead_code)]

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

/// A request as the mock server saw it.
#[derive(Debug, Clone)]
pub struct Captured {
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
struct Mock {
    status: StatusCode,
    body: String,
    delay: Duration,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Captured>>>,
}

pub struct MockServer {
    pub endpoint: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl MockServer {
    /// Reply 200 with a single choice carrying `content`.
    pub async fn reply(content: &str) -> Self {
        Self::start(StatusCode::OK, completion(content), Duration::ZERO).await
    }

    /// Reply 200 with a single choice after `delay`.
    pub async fn slow(content: &str, delay: Duration) -> Self {
        Self::start(StatusCode::OK, completion(content), delay).await
    }

    /// Reply with an arbitrary status and raw body.
    pub async fn raw(status: StatusCode, body: &str) -> Self {
        Self::start(status, body.to_owned(), Duration::ZERO).await
    }

    async fn start(status: StatusCode, body: String, delay: Duration) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let mock = Mock {
            status,
            body,
            delay,
            hits: hits.clone(),
            requests: requests.clone(),
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new()
            .route("/v1/chat/completions", post(handle))
            .with_state(mock);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            endpoint: format!("http://{addr}/v1/chat/completions"),
            hits,
            requests,
        }
    }

    /// Number of requests received.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// The most recent request.
    pub fn last(&self) -> Captured {
        self.requests.lock().last().cloned().expect("no request")
    }
}

async fn handle(
    State(mock): State<Mock>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    mock.hits.fetch_add(1, Ordering::SeqCst);
    mock.requests.lock().push(Captured {
        headers,
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });
    if !mock.delay.is_zero() {
        tokio::time::sleep(mock.delay).await;
    }
    (
        mock.status,
        [(header::CONTENT_TYPE, "application/json")],
        mock.body,
    )
}

/// A chat completions body with one choice.
pub fn completion(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

/// An endpoint on a port nothing listens on.
pub async fn unreachable_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/v1/chat/completions")
}
