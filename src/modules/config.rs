use std::fs;
use std::path::PathBuf;

use crate::proxy::ProxyConfig;

const DATA_DIR: &str = ".gemini_proxy";
const CONFIG_FILE: &str = "proxy_config.json";

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_CONFIG_PATH: &str = "GEMINI_PROXY_CONFIG";
pub const ENV_PORT: &str = "PROXY_PORT";
pub const ENV_ALLOW_LAN: &str = "PROXY_ALLOW_LAN";

/// Get data directory path, created on demand
pub fn get_data_dir() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or("Failed to get user home directory")?;
    let data_dir = home.join(DATA_DIR);

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)
            .map_err(|e| format!("Failed to create data directory: {}", e))?;
    }

    Ok(data_dir)
}

fn config_path() -> Result<PathBuf, String> {
    match std::env::var(ENV_CONFIG_PATH) {
        Ok(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(get_data_dir()?.join(CONFIG_FILE)),
    }
}

/// Load proxy config: JSON file first, then environment overrides
pub fn load_proxy_config() -> Result<ProxyConfig, String> {
    let config_path = config_path()?;

    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?
    } else {
        ProxyConfig::default()
    };

    apply_env_overrides(config, |name| std::env::var(name).ok())
}

/// Overlay environment values on top of a loaded config
pub fn apply_env_overrides<F>(mut config: ProxyConfig, lookup: F) -> Result<ProxyConfig, String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(ENV_API_KEY) {
        config.api_key = Some(key);
    }

    if let Some(port) = lookup(ENV_PORT) {
        config.port = port
            .trim()
            .parse()
            .map_err(|e| format!("Invalid {}: {}", ENV_PORT, e))?;
    }

    if let Some(flag) = lookup(ENV_ALLOW_LAN) {
        config.allow_lan_access = matches!(
            flag.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        );
    }

    Ok(config)
}
