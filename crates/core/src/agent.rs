//! Agent profile types.
//!
//! A profile is the declarative half of an agent: which model it talks to,
//! what it is told, and which tools it may call. Running the agent is the
//! job of an external runtime.

use serde::{Deserialize, Serialize};

/// Declarative configuration of one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Display name, unique within a roster
    pub name: String,

    /// Short role statement, used when the agent is a team member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Model id (e.g. "gpt-4.1"). `None` leaves the choice to the runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// System instructions
    #[serde(default)]
    pub instructions: String,

    /// Names of the tools this agent may call
    #[serde(default)]
    pub tools: Vec<String>,

    /// Render responses as markdown
    #[serde(default = "default_true")]
    pub markdown: bool,

    /// Echo tool calls in the transcript
    #[serde(default)]
    pub show_tool_calls: bool,

    /// Knowledge base backing this agent, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge: Option<KnowledgeSource>,
}

fn default_true() -> bool {
    true
}

impl AgentProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
            model: None,
            instructions: String::new(),
            tools: Vec::new(),
            markdown: true,
            show_tool_calls: false,
            knowledge: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tools.push(tool.into());
        self
    }

    pub fn with_tool_calls_shown(mut self) -> Self {
        self.show_tool_calls = true;
        self
    }

    pub fn with_knowledge(mut self, knowledge: KnowledgeSource) -> Self {
        self.knowledge = Some(knowledge);
        self
    }
}

/// A document collection indexed in a vector database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSource {
    /// Vector collection name
    pub collection: String,

    /// Vector database endpoint
    pub vector_db_url: String,

    /// Source documents (URLs) loaded into the collection
    #[serde(default)]
    pub documents: Vec<String>,
}
