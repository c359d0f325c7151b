//! `raindeck tools` — List, describe, and call registered tools.

use raindeck_config::AppConfig;
use raindeck_core::tool::{ToolCall, ToolDefinition, ToolRegistry};

fn registry() -> Result<ToolRegistry, Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    Ok(raindeck_tools::default_registry(&config))
}

pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let registry = registry()?;
    print!("{}", render_list(&registry.definitions()));
    Ok(())
}

pub async fn schema(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let registry = registry()?;
    let tool = registry
        .get(name)
        .ok_or_else(|| format!("Unknown tool: {name} (try `raindeck tools list`)"))?;
    println!("{}", serde_json::to_string_pretty(&tool.parameters_schema())?);
    Ok(())
}

pub async fn call(name: &str, args: &str) -> Result<(), Box<dyn std::error::Error>> {
    let registry = registry()?;
    let call = build_call(name, args)?;
    tracing::debug!(call_id = %call.id, tool = %call.name, "Executing tool call");

    let result = registry.execute(&call).await?;
    println!("{}", result.output);
    Ok(())
}

/// Parse `args` as a JSON object and wrap it in a call with a fresh ID.
pub fn build_call(name: &str, args: &str) -> Result<ToolCall, Box<dyn std::error::Error>> {
    let arguments: serde_json::Value =
        serde_json::from_str(args).map_err(|e| format!("--args is not valid JSON: {e}"))?;
    if !arguments.is_object() {
        return Err("--args must be a JSON object".into());
    }
    Ok(ToolCall {
        id: format!("call_{}", uuid::Uuid::new_v4().simple()),
        name: name.to_string(),
        arguments,
    })
}

pub fn render_list(definitions: &[ToolDefinition]) -> String {
    let mut out = String::from("🧰 Registered tools\n==================\n");
    for def in definitions {
        out.push_str(&format!("\n  {}\n    {}\n", def.name, def.description));
        if let Some(props) = def.parameters["properties"].as_object() {
            let params: Vec<&str> = props.keys().map(String::as_str).collect();
            out.push_str(&format!("    params: {}\n", params.join(", ")));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_call_assigns_unique_ids() {
        let a = build_call("get_raindrops_by_date_and_tag", r#"{"tag":"rust"}"#).unwrap();
        let b = build_call("get_raindrops_by_date_and_tag", "{}").unwrap();
        assert!(a.id.starts_with("call_"));
        assert_ne!(a.id, b.id);
        assert_eq!(a.arguments["tag"], "rust");
    }

    #[test]
    fn build_call_rejects_non_objects() {
        assert!(build_call("x", "[1, 2]").is_err());
        assert!(build_call("x", "not json").is_err());
    }

    #[test]
    fn render_list_shows_params() {
        let registry = raindeck_tools::default_registry(&AppConfig::default());
        let text = render_list(&registry.definitions());
        assert!(text.contains("get_raindrops_by_date_and_tag"));
        assert!(text.contains("start_date"));
        assert!(text.contains("limit"));
    }
}
