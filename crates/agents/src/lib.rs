//! Declarative agent roster for raindeck.
//!
//! The built-in roster mirrors the playground line-up: a barebone chat
//! agent, finance and reasoning agents, a knowledge-base agent and the
//! Raindrop bookmark agent. Profiles only describe agents; an external
//! runtime runs them. Tools a profile names but raindeck does not implement
//! (market data, reasoning scratchpads) are reported as external.

use raindeck_core::agent::{AgentProfile, KnowledgeSource};
use raindeck_core::tool::{ToolDefinition, ToolRegistry};
use serde::Serialize;
use tracing::debug;

pub const RAINDROP_TOOL: &str = "get_raindrops_by_date_and_tag";
pub const YFINANCE_TOOL: &str = "yfinance";
pub const REASONING_TOOL: &str = "reasoning";

/// Errors from roster lookups.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),
}

/// An ordered set of agent profiles with unique (case-insensitive) names.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    profiles: Vec<AgentProfile>,
}

/// A profile with its tools split by where they come from.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedAgent {
    pub profile: AgentProfile,
    /// Tools implemented here, with their schemas
    pub local_tools: Vec<ToolDefinition>,
    /// Tools the agent runtime must supply
    pub external_tools: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in demo agents, in playground order.
    pub fn builtin() -> Self {
        let mut roster = Self::new();
        for profile in builtin_profiles() {
            roster.insert(profile);
        }
        roster
    }

    /// Built-in agents plus `extra`, where an extra profile replaces a
    /// built-in one of the same name.
    pub fn with_extra(extra: &[AgentProfile]) -> Self {
        let mut roster = Self::builtin();
        for profile in extra {
            roster.insert(profile.clone());
        }
        roster
    }

    /// Add a profile, replacing any existing one with the same name in place.
    pub fn insert(&mut self, profile: AgentProfile) {
        match self.position(&profile.name) {
            Some(idx) => {
                debug!(agent = %profile.name, "Replacing agent profile");
                self.profiles[idx] = profile;
            }
            None => self.profiles.push(profile),
        }
    }

    /// Look up a profile by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&AgentProfile> {
        self.position(name).map(|idx| &self.profiles[idx])
    }

    pub fn profiles(&self) -> &[AgentProfile] {
        &self.profiles
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Resolve a profile's tool names against `registry`.
    pub fn resolve(&self, name: &str, registry: &ToolRegistry) -> Result<ResolvedAgent, RosterError> {
        let profile = self
            .get(name)
            .ok_or_else(|| RosterError::UnknownAgent(name.to_string()))?;

        let mut local_tools = Vec::new();
        let mut external_tools = Vec::new();
        for tool in &profile.tools {
            match registry.get(tool) {
                Some(t) => local_tools.push(t.to_definition()),
                None => external_tools.push(tool.clone()),
            }
        }

        Ok(ResolvedAgent {
            profile: profile.clone(),
            local_tools,
            external_tools,
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.profiles
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
    }
}

fn builtin_profiles() -> Vec<AgentProfile> {
    vec![
        AgentProfile::new("Simple Tool")
            .with_model("gpt-4.1")
            .with_instructions("Use tables to display data.")
            .with_tool(YFINANCE_TOOL)
            .with_tool_calls_shown(),
        AgentProfile::new("Raindrop Agent")
            .with_instructions(
                "You are a helpful assistant that can help me with my raindrops. \
                 Add as summary the raindrops that you find.",
            )
            .with_tool(RAINDROP_TOOL)
            .with_tool_calls_shown(),
        AgentProfile::new("Barebone Agent")
            .with_model("gpt-4.1")
            .with_instructions("You are a helpful assistant that can answer users questions."),
        AgentProfile::new("Knowledge Agent")
            .with_role("Search the knowledge base for information")
            .with_knowledge(KnowledgeSource {
                collection: "thai-recipes".into(),
                vector_db_url: "http://localhost:6333".into(),
                documents: vec![
                    "https://agno-public.s3.amazonaws.com/recipes/ThaiRecipes.pdf".into(),
                ],
            })
            .with_tool_calls_shown(),
        AgentProfile::new("Agent with reasoning tools")
            .with_model("gpt-4o")
            .with_instructions("Use tables where possible")
            .with_tool(REASONING_TOOL)
            .with_tool(YFINANCE_TOOL)
            .with_tool_calls_shown(),
        AgentProfile::new("Reasoning Agent")
            .with_model("o3-mini")
            .with_instructions("Use tables to display data.")
            .with_tool(YFINANCE_TOOL)
            .with_tool_calls_shown(),
    ]
}
