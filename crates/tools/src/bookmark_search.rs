//! `get_raindrops_by_date_and_tag` — bookmark search exposed as a tool.
//!
//! Wraps [`RaindropClient`] so an agent can ask for "raindrops tagged python
//! from January to April" and get back the normalized search result.

use std::sync::Arc;

use async_trait::async_trait;
use raindeck_core::bookmark::SearchFilter;
use raindeck_core::error::{BookmarkError, ToolError};
use raindeck_core::tool::{Tool, ToolResult};

use crate::raindrop::RaindropClient;

pub const TOOL_NAME: &str = "get_raindrops_by_date_and_tag";

pub struct RaindropTool {
    client: Arc<RaindropClient>,
    default_collection: i64,
    default_limit: u32,
}

impl RaindropTool {
    pub fn new(client: Arc<RaindropClient>) -> Self {
        Self {
            client,
            default_collection: 0,
            default_limit: raindeck_core::MAX_PAGE_SIZE,
        }
    }

    /// Defaults applied when a call omits `collection_id` / `limit`.
    pub fn with_defaults(mut self, collection_id: i64, limit: u32) -> Self {
        self.default_collection = collection_id;
        self.default_limit = limit;
        self
    }

    fn filter_from_arguments(&self, arguments: &serde_json::Value) -> Result<SearchFilter, ToolError> {
        let start_date = optional_str(arguments, "start_date")?;
        let end_date = optional_str(arguments, "end_date")?;
        let tag = optional_str(arguments, "tag")?;
        let collection_id = optional_i64(arguments, "collection_id")?.unwrap_or(self.default_collection);
        let limit = match optional_i64(arguments, "limit")? {
            Some(n) if n < 0 => {
                return Err(ToolError::InvalidArguments(format!(
                    "'limit' must be positive, got {n}"
                )));
            }
            Some(n) => u32::try_from(n).unwrap_or(u32::MAX),
            None => self.default_limit,
        };

        SearchFilter::parse(start_date, end_date, tag, collection_id, limit)
            .map_err(|e| self.to_tool_error(e))
    }

    fn to_tool_error(&self, err: BookmarkError) -> ToolError {
        match err {
            BookmarkError::Validation { .. } => ToolError::InvalidArguments(format!(
                "Invalid date format. Please use YYYY-MM-DD format: {err}"
            )),
            BookmarkError::Authentication(reason) => ToolError::PermissionDenied {
                tool_name: TOOL_NAME.into(),
                reason,
            },
            other => ToolError::ExecutionFailed {
                tool_name: TOOL_NAME.into(),
                reason: other.to_string(),
            },
        }
    }
}

#[async_trait]
impl Tool for RaindropTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Retrieve Raindrop bookmarks created between specific dates with a specific tag. \
         Returns the matching bookmarks (title, link, tags, excerpt, creation time) and \
         the total number of matches."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "start_date": {
                    "type": "string",
                    "description": "Only bookmarks created after this date (YYYY-MM-DD)"
                },
                "end_date": {
                    "type": "string",
                    "description": "Only bookmarks created before this date (YYYY-MM-DD)"
                },
                "tag": {
                    "type": "string",
                    "description": "Tag to filter bookmarks by, without the leading #"
                },
                "collection_id": {
                    "type": "integer",
                    "description": "Collection to search in (0 for all collections)",
                    "default": self.default_collection
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of bookmarks to return (max 50)",
                    "maximum": 50,
                    "default": self.default_limit
                }
            },
            "required": []
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let filter = self.filter_from_arguments(&arguments)?;
        let result = self
            .client
            .search_bookmarks(&filter)
            .await
            .map_err(|e| self.to_tool_error(e))?;

        let data = serde_json::to_value(&result).map_err(|e| ToolError::ExecutionFailed {
            tool_name: TOOL_NAME.into(),
            reason: format!("failed to serialize result: {e}"),
        })?;
        let output = serde_json::to_string_pretty(&data).unwrap_or_default();

        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output,
            data: Some(data),
        })
    }
}

/// A string argument; absent or null means "not given".
fn optional_str<'a>(arguments: &'a serde_json::Value, key: &str) -> Result<Option<&'a str>, ToolError> {
    match arguments.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(ToolError::InvalidArguments(format!(
            "'{key}' must be a string, got {other}"
        ))),
    }
}

/// An integer argument; absent or null means "not given".
fn optional_i64(arguments: &serde_json::Value, key: &str) -> Result<Option<i64>, ToolError> {
    match arguments.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => value.as_i64().map(Some).ok_or_else(|| {
            ToolError::InvalidArguments(format!("'{key}' must be an integer, got {value}"))
        }),
    }
}
