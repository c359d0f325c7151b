//! `raindeck agents` — Show the agent roster.

use raindeck_agents::{ResolvedAgent, Roster};
use raindeck_config::AppConfig;

pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let roster = Roster::with_extra(&config.agents);

    println!("🤖 Agents");
    println!("=========");
    for profile in roster.profiles() {
        let model = profile.model.as_deref().unwrap_or(&config.default_model);
        let tools = if profile.tools.is_empty() {
            "-".to_string()
        } else {
            profile.tools.join(", ")
        };
        println!("  {:<28} {:<10} {}", profile.name, model, tools);
    }
    Ok(())
}

pub async fn show(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let roster = Roster::with_extra(&config.agents);
    let registry = raindeck_tools::default_registry(&config);
    let resolved = roster.resolve(name, &registry)?;
    print!("{}", render(&resolved, &config.default_model));
    Ok(())
}

pub fn render(agent: &ResolvedAgent, default_model: &str) -> String {
    let profile = &agent.profile;
    let mut out = format!("🤖 {}\n", profile.name);
    out.push_str(&"=".repeat(profile.name.chars().count() + 3));
    out.push('\n');

    let model = match &profile.model {
        Some(model) => model.clone(),
        None => format!("{default_model} (default)"),
    };
    out.push_str(&format!("  Model:        {model}\n"));
    if let Some(role) = &profile.role {
        out.push_str(&format!("  Role:         {role}\n"));
    }
    if !profile.instructions.is_empty() {
        out.push_str(&format!("  Instructions: {}\n", profile.instructions));
    }
    out.push_str(&format!("  Markdown:     {}\n", if profile.markdown { "yes" } else { "no" }));
    out.push_str(&format!(
        "  Tool calls:   {}\n",
        if profile.show_tool_calls { "shown" } else { "hidden" }
    ));

    for tool in &agent.local_tools {
        out.push_str(&format!("  Tool:         {} — {}\n", tool.name, tool.description));
    }
    for tool in &agent.external_tools {
        out.push_str(&format!("  Tool:         {tool} (provided by the agent runtime)\n"));
    }

    if let Some(knowledge) = &profile.knowledge {
        out.push_str(&format!(
            "  Knowledge:    {} @ {}\n",
            knowledge.collection, knowledge.vector_db_url
        ));
        for doc in &knowledge.documents {
            out.push_str(&format!("                {doc}\n"));
        }
    }
    out
}
