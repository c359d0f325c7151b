//! `raindeck config` — Configuration management commands.

use std::path::Path;

use raindeck_config::AppConfig;

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    println!("{}", config.redacted_toml()?);
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_path();
    if write_default_config(&config_path)? {
        println!("✅ Created config file: {}", config_path.display());
        println!("   Set RAINDROP_ACCESS_TOKEN or edit [raindrop].access_token to enable search.");
    } else {
        println!("  Config file exists: {}", config_path.display());
    }
    Ok(())
}

/// Write the default config to `path` unless a file is already there.
/// Returns whether a file was written.
pub fn write_default_config(path: &Path) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, AppConfig::default_toml())?;
    Ok(true)
}
