//! Tool implementations for raindeck.
//!
//! The Raindrop client does the bookmark search; the bookmark-search tool
//! exposes it to agents through the `Tool` contract.

pub mod bookmark_search;
pub mod raindrop;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use raindeck_config::AppConfig;
use raindeck_core::tool::ToolRegistry;

pub use bookmark_search::RaindropTool;
pub use raindrop::{RaindropClient, SearchParams, parse_search_response};

/// Create a tool registry with every tool raindeck implements, wired from
/// `config`. A missing Raindrop token does not prevent registration; the
/// search fails when called.
pub fn default_registry(config: &AppConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    let client = Arc::new(RaindropClient::from_config(&config.raindrop));
    registry.register(Box::new(
        RaindropTool::new(client)
            .with_defaults(config.raindrop.default_collection, config.raindrop.default_limit),
    ));
    registry
}
