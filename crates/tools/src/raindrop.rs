//! Raindrop.io REST client — bookmark search by date range and tag.
//!
//! One search is one authenticated `GET /raindrops/{collection_id}`. The
//! filter becomes Raindrop's text query (`#tag created:>date created:<date`),
//! the response's `items` are normalized into [`BookmarkRecord`]s, and the
//! provider's `count` is passed through as-is. No retries, no caching.

use std::time::Duration;

use chrono::{DateTime, Utc};
use raindeck_config::{DEFAULT_RAINDROP_BASE_URL, RaindropConfig};
use raindeck_core::bookmark::{BookmarkRecord, SearchFilter, SearchResult};
use raindeck_core::error::BookmarkError;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Values above this are read as epoch milliseconds rather than seconds.
const EPOCH_MILLIS_THRESHOLD: u64 = 20_000_000_000;

/// Query parameters for one search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    pub search: String,
    pub sort: &'static str,
    pub perpage: u32,
    pub page: u32,
}

impl SearchParams {
    /// First page of results for `filter`, newest-created ordering as the
    /// provider defines `sort=created`.
    pub fn for_filter(filter: &SearchFilter) -> Self {
        Self {
            search: filter.query(),
            sort: "created",
            perpage: filter.per_page(),
            page: 0,
        }
    }
}

/// Client for the Raindrop.io bookmark API.
///
/// Holds no per-request state; concurrent searches share only the pooled
/// `reqwest::Client`.
pub struct RaindropClient {
    base_url: String,
    access_token: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl RaindropClient {
    /// Create a client against the public Raindrop API.
    pub fn new(access_token: Option<String>) -> Self {
        Self {
            base_url: DEFAULT_RAINDROP_BASE_URL.to_string(),
            access_token,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            client: build_http_client(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a client from the `[raindrop]` config section.
    pub fn from_config(config: &RaindropConfig) -> Self {
        Self::new(config.token().map(str::to_string))
            .with_base_url(&config.base_url)
            .with_timeout(config.timeout_secs)
    }

    /// Point the client at another endpoint (self-hosted proxy, test server).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self.client = build_http_client(timeout_secs);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Full URL of the raindrops listing for a collection.
    pub fn endpoint(&self, collection_id: i64) -> String {
        format!("{}/raindrops/{collection_id}", self.base_url)
    }

    /// Search bookmarks matching `filter`.
    ///
    /// Fails with [`BookmarkError::Authentication`] before any network
    /// traffic when no token is configured.
    pub async fn search_bookmarks(
        &self,
        filter: &SearchFilter,
    ) -> Result<SearchResult, BookmarkError> {
        let token = self.token().ok_or_else(|| {
            BookmarkError::Authentication(
                "Raindrop access token is required (set RAINDROP_ACCESS_TOKEN)".into(),
            )
        })?;

        let url = self.endpoint(filter.collection_id);
        let params = SearchParams::for_filter(filter);

        debug!(
            url = %url,
            search = %params.search,
            perpage = params.perpage,
            "Searching Raindrop bookmarks"
        );

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| {
                let err = self.transport_error(e);
                error!(error = %err, "Error making request to Raindrop API");
                err
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let err = BookmarkError::Transport {
                status: Some(status.as_u16()),
                message: format!("failed to read response body: {e}"),
            };
            error!(error = %err, "Error reading Raindrop API response");
            err
        })?;

        if !status.is_success() {
            error!(status = status.as_u16(), body = %body, "Raindrop API returned an error");
            return Err(BookmarkError::Transport {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        parse_search_response(&body).inspect_err(|e| {
            error!(error = %e, "Unexpected Raindrop API response");
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> BookmarkError {
        let message = if e.is_timeout() {
            format!("request timed out after {}s: {e}", self.timeout_secs)
        } else {
            e.to_string()
        };
        BookmarkError::Transport {
            status: e.status().map(|s| s.as_u16()),
            message,
        }
    }
}

fn build_http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("raindeck/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
}

// --- Response mapping ---

#[derive(Deserialize)]
struct ApiSearchResponse {
    #[serde(default)]
    items: Vec<ApiRaindrop>,
    #[serde(default)]
    count: u64,
}

/// One raindrop as the API returns it. Everything is optional so a sparse
/// item still maps.
#[derive(Deserialize)]
struct ApiRaindrop {
    #[serde(rename = "_id", default)]
    id: serde_json::Value,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    created: serde_json::Value,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    excerpt: Option<String>,
    #[serde(default)]
    cover: Option<String>,
    #[serde(default)]
    collection: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ApiRaindrop {
    fn into_record(self) -> Result<BookmarkRecord, BookmarkError> {
        let id = match self.id {
            serde_json::Value::String(s) => s,
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        };
        let created = parse_created(&self.created)
            .map_err(|reason| BookmarkError::Decode(format!("raindrop {id}: {reason}")))?;

        Ok(BookmarkRecord {
            id,
            title: self.title.unwrap_or_default(),
            link: self.link.unwrap_or_default(),
            created,
            tags: self.tags.unwrap_or_default(),
            excerpt: self.excerpt,
            cover: self.cover,
            collection: self.collection.unwrap_or_default(),
        })
    }
}

/// `created` is an RFC 3339 string in practice; epoch numbers are accepted
/// too, and a missing value maps to the Unix epoch.
fn parse_created(value: &serde_json::Value) -> Result<DateTime<Utc>, String> {
    match value {
        serde_json::Value::Null => Ok(DateTime::<Utc>::UNIX_EPOCH),
        serde_json::Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| format!("invalid created timestamp {s:?}: {e}")),
        serde_json::Value::Number(n) => {
            let ts = n
                .as_i64()
                .ok_or_else(|| format!("invalid created timestamp {n}"))?;
            let parsed = if ts.unsigned_abs() > EPOCH_MILLIS_THRESHOLD {
                DateTime::from_timestamp_millis(ts)
            } else {
                DateTime::from_timestamp(ts, 0)
            };
            parsed.ok_or_else(|| format!("created timestamp out of range: {ts}"))
        }
        other => Err(format!("unexpected created value: {other}")),
    }
}

/// Map a raw search response body into a [`SearchResult`].
///
/// `count` is taken verbatim and never checked against the number of items.
pub fn parse_search_response(body: &str) -> Result<SearchResult, BookmarkError> {
    let raw: ApiSearchResponse =
        serde_json::from_str(body).map_err(|e| BookmarkError::Decode(e.to_string()))?;

    let items = raw
        .items
        .into_iter()
        .map(ApiRaindrop::into_record)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SearchResult {
        items,
        count: raw.count,
    })
}
