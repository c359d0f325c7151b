//! # raindeck core
//!
//! Domain types, traits, and error definitions shared by every raindeck
//! crate. Nothing in here talks to the network.
//!
//! - [`tool`]: the `Tool` contract and the registry agents pick tools from
//! - [`bookmark`]: search filters and normalized bookmark records
//! - [`agent`]: declarative agent profiles
//! - [`error`]: per-context error enums

pub mod error;
pub mod tool;
pub mod bookmark;
pub mod agent;

// Re-export key types at crate root for ergonomics
pub use error::{BookmarkError, ToolError};
pub use tool::{Tool, ToolCall, ToolDefinition, ToolRegistry, ToolResult};
pub use bookmark::{BookmarkRecord, SearchFilter, SearchResult, MAX_PAGE_SIZE};
pub use agent::{AgentProfile, KnowledgeSource};
