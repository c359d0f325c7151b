//! Error types for the raindeck domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum.

use thiserror::Error;

// --- Bounded context errors ---

/// Failures of a bookmark search against the remote provider.
///
/// A failed search never yields a partial result: every variant means the
/// caller got nothing back.
#[derive(Debug, Clone, Error)]
pub enum BookmarkError {
    /// No access token was configured. Checked at call time, not at startup.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A filter field could not be parsed as a calendar date.
    #[error("Invalid {field}: expected YYYY-MM-DD ({source})")]
    Validation {
        field: &'static str,
        #[source]
        source: chrono::ParseError,
    },

    /// The HTTP exchange failed: connect error, timeout, or non-2xx status.
    /// `status` is `None` when no response was received.
    #[error("Bookmark API request failed: {message}{}", status_suffix(.status))]
    Transport { status: Option<u16>, message: String },

    /// A successful response whose body was not the expected JSON shape.
    #[error("Failed to decode bookmark API response: {0}")]
    Decode(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status: {s})")).unwrap_or_default()
}

impl BookmarkError {
    /// Upstream HTTP status, when the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether the provider rejected the credential (401/403).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Permission denied: {tool_name} — {reason}")]
    PermissionDenied { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}
