//! In-process stand-in for the Raindrop API, served by axum on a random port.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;

/// What the mock saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: serde_json::Value,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockRaindrop {
    /// Base URL to hand to the client, ending in `/rest/v1`.
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockRaindrop {
    /// Answer every request with `status` and the JSON `body`.
    pub async fn start(status: StatusCode, body: serde_json::Value) -> Self {
        Self::spawn(status, body, None).await
    }

    /// Answer every request only after `delay`.
    pub async fn start_slow(delay: Duration) -> Self {
        Self::spawn(
            StatusCode::OK,
            serde_json::json!({"items": [], "count": 0}),
            Some(delay),
        )
        .await
    }

    /// A base URL on which nothing is listening.
    pub async fn closed_base_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/rest/v1")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    async fn spawn(status: StatusCode, body: serde_json::Value, delay: Option<Duration>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            body,
            delay,
            requests: requests.clone(),
        };
        let app = Router::new().fallback(handle).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/rest/v1"),
            requests,
        }
    }
}

async fn handle(
    State(state): State<MockState>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        query,
        authorization: header("authorization"),
        content_type: header("content-type"),
    });

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    (state.status, axum::Json(state.body))
}
