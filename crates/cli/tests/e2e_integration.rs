//! End-to-end tests: config file → tool registry → Raindrop search against
//! an in-process stand-in for the Raindrop API.

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use raindeck_agents::Roster;
use raindeck_config::AppConfig;
use raindeck_core::bookmark::SearchFilter;
use raindeck_core::error::{BookmarkError, ToolError};
use raindeck_core::tool::ToolCall;
use raindeck_tools::{RaindropClient, default_registry};

// ── Mock Raindrop API ────────────────────────────────────────────────────

type Seen = Arc<Mutex<Vec<(String, HashMap<String, String>, Option<String>)>>>;

#[derive(Clone)]
struct Api {
    status: StatusCode,
    body: serde_json::Value,
    seen: Seen,
}

async fn raindrops(
    State(api): State<Api>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    api.seen
        .lock()
        .unwrap()
        .push((uri.path().to_string(), query, auth));
    (api.status, axum::Json(api.body))
}

async fn serve(status: StatusCode, body: serde_json::Value) -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(raindrops).with_state(Api {
        status,
        body,
        seen: seen.clone(),
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/rest/v1"), seen)
}

fn config_file(base_url: &str, token: Option<&str>) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[raindrop]").unwrap();
    writeln!(file, "base_url = \"{base_url}\"").unwrap();
    writeln!(file, "timeout_secs = 5").unwrap();
    if let Some(token) = token {
        writeln!(file, "access_token = \"{token}\"").unwrap();
    }
    file
}

fn sample_page() -> serde_json::Value {
    serde_json::json!({
        "result": true,
        "items": [
            {
                "_id": 901,
                "title": "Structural pattern matching",
                "link": "https://example.com/match",
                "created": "2025-02-02T08:00:00.000Z",
                "tags": ["python"],
                "excerpt": "PEP 634 in practice",
                "cover": "https://example.com/match.png",
                "collection": {"$id": 7}
            },
            {
                "_id": 902,
                "title": "Typing generics",
                "link": "https://example.com/generics",
                "created": "2025-03-15T18:45:00.000Z"
            }
        ],
        "count": 64
    })
}

// ── E2E ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_tool_call_through_registry() {
    let (base_url, seen) = serve(StatusCode::OK, sample_page()).await;
    let file = config_file(&base_url, Some("e2e-token"));
    let config = AppConfig::load_from(file.path()).unwrap();
    let registry = default_registry(&config);

    let call = ToolCall {
        id: "call_raindrop".into(),
        name: "get_raindrops_by_date_and_tag".into(),
        arguments: serde_json::json!({
            "tag": "python",
            "start_date": "2025-01-01",
            "end_date": "2025-04-30"
        }),
    };
    let result = registry.execute(&call).await.unwrap();

    assert!(result.success);
    assert_eq!(result.call_id, "call_raindrop");
    let data = result.data.unwrap();
    assert_eq!(data["count"], 64);
    assert_eq!(data["items"][0]["id"], "901");
    assert_eq!(data["items"][0]["excerpt"], "PEP 634 in practice");
    assert_eq!(data["items"][1]["tags"], serde_json::json!([]));
    assert!(data["items"][1]["cover"].is_null());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (path, query, auth) = &seen[0];
    assert_eq!(path, "/rest/v1/raindrops/0");
    assert_eq!(query["search"], "#python created:>2025-01-01 created:<2025-04-30");
    assert_eq!(query["sort"], "created");
    assert_eq!(query["perpage"], "50");
    assert_eq!(query["page"], "0");
    assert_eq!(auth.as_deref(), Some("Bearer e2e-token"));
}

#[tokio::test]
async fn e2e_env_token_overrides_file() {
    let (base_url, seen) = serve(StatusCode::OK, serde_json::json!({"items": [], "count": 0})).await;
    let file = config_file(&base_url, None);
    let mut config = AppConfig::load_from(file.path()).unwrap();
    config.apply_env(|key| (key == "RAINDROP_ACCESS_TOKEN").then(|| "from-env".to_string()));

    let client = RaindropClient::from_config(&config.raindrop);
    let result = client.search_bookmarks(&SearchFilter::new()).await.unwrap();
    assert_eq!(result.count, 0);
    assert_eq!(seen.lock().unwrap()[0].2.as_deref(), Some("Bearer from-env"));
}

#[tokio::test]
async fn e2e_missing_token_makes_no_request() {
    let (base_url, seen) = serve(StatusCode::OK, sample_page()).await;
    let file = config_file(&base_url, None);
    let config = AppConfig::load_from(file.path()).unwrap();

    let client = RaindropClient::from_config(&config.raindrop);
    let err = client.search_bookmarks(&SearchFilter::new()).await.unwrap_err();
    assert!(matches!(err, BookmarkError::Authentication(_)));
    assert!(seen.lock().unwrap().is_empty());

    let registry = default_registry(&config);
    let call = ToolCall {
        id: "call_1".into(),
        name: "get_raindrops_by_date_and_tag".into(),
        arguments: serde_json::json!({}),
    };
    let err = registry.execute(&call).await.unwrap_err();
    assert!(matches!(err, ToolError::PermissionDenied { .. }));
}

#[tokio::test]
async fn e2e_unauthorized_keeps_status() {
    let (base_url, _seen) = serve(
        StatusCode::UNAUTHORIZED,
        serde_json::json!({"result": false, "errorMessage": "Invalid token"}),
    )
    .await;
    let client = RaindropClient::new(Some("revoked".into())).with_base_url(&base_url);

    let err = client.search_bookmarks(&SearchFilter::new().with_tag("python")).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(matches!(err, BookmarkError::Transport { .. }));
    assert!(err.to_string().contains("Invalid token"));
}

#[tokio::test]
async fn e2e_large_limit_is_capped() {
    let (base_url, seen) = serve(StatusCode::OK, sample_page()).await;
    let client = RaindropClient::new(Some("token".into())).with_base_url(&base_url);

    let result = client
        .search_bookmarks(&SearchFilter::new().with_limit(500).with_collection(12))
        .await
        .unwrap();
    assert_eq!(result.items.len(), 2);
    assert_eq!(result.count, 64);

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].0, "/rest/v1/raindrops/12");
    assert_eq!(seen[0].1["perpage"], "50");
}

#[tokio::test]
async fn e2e_roster_resolves_configured_agents() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[[agents]]
name = "Weekly Digest"
model = "gpt-4.1"
instructions = "List what I bookmarked this week, grouped by tag."
tools = ["get_raindrops_by_date_and_tag", "reasoning"]
"#
    )
    .unwrap();
    let config = AppConfig::load_from(file.path()).unwrap();
    let registry = default_registry(&config);
    let roster = Roster::with_extra(&config.agents);

    let digest = roster.resolve("weekly digest", &registry).unwrap();
    assert_eq!(digest.local_tools.len(), 1);
    assert_eq!(digest.local_tools[0].name, "get_raindrops_by_date_and_tag");
    assert_eq!(digest.external_tools, vec!["reasoning"]);

    let json = serde_json::to_value(&digest).unwrap();
    assert_eq!(json["profile"]["name"], "Weekly Digest");
    assert!(json["local_tools"][0]["parameters"]["properties"]["tag"].is_object());
}
