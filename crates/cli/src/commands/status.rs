//! `raindeck status` — Show configuration status.

use raindeck_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("🔖 raindeck Status");
    println!("==================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Raindrop API: {}", config.raindrop.base_url);
    println!("  Token:        {}", if config.raindrop.has_token() { "configured" } else { "missing" });
    println!("  Timeout:      {}s", config.raindrop.timeout_secs);
    println!("  Collection:   {}", collection_label(config.raindrop.default_collection));
    println!("  Page size:    {}", config.raindrop.default_limit);
    println!("  Model:        {}", config.default_model);
    println!("  LLM API key:  {}", if config.has_api_key() { "configured" } else { "missing" });
    println!("  Extra agents: {}", config.agents.len());

    if AppConfig::config_path().exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `raindeck config init` first");
    }
    if !config.raindrop.has_token() {
        println!("  ⚠️  Searches will fail until RAINDROP_ACCESS_TOKEN is set");
    }

    Ok(())
}

fn collection_label(id: i64) -> String {
    if id == 0 {
        "all (0)".into()
    } else {
        id.to_string()
    }
}
