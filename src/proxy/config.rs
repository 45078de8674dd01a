use serde::{Deserialize, Serialize};

/// Proxy service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Allow LAN access
    /// - false: local only, 127.0.0.1 (default)
    /// - true: listen on 0.0.0.0
    #[serde(default)]
    pub allow_lan_access: bool,

    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Gemini API key, normally supplied through GEMINI_API_KEY
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Upstream request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Outbound proxy for upstream calls
    #[serde(default)]
    pub upstream_proxy: UpstreamProxyConfig,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

/// Upstream proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpstreamProxyConfig {
    /// Enabled
    pub enabled: bool,
    /// Proxy address (http://, https://, socks5://)
    pub url: String,
}

/// Per-process call budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_ms: default_window_ms(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            allow_lan_access: false,
            port: default_port(),
            api_key: None,
            request_timeout: default_request_timeout(),
            upstream_proxy: UpstreamProxyConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

fn default_port() -> u16 {
    8045
}

fn default_request_timeout() -> u64 {
    120
}

// Code has always enforced 120/min even though the old comment said 8
fn default_max_requests() -> u32 {
    120
}

fn default_window_ms() -> u64 {
    60_000
}

impl ProxyConfig {
    /// Get the actual bind address
    /// - allow_lan_access = false: "127.0.0.1"
    /// - allow_lan_access = true: "0.0.0.0"
    pub fn get_bind_address(&self) -> &str {
        if self.allow_lan_access {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        }
    }

    /// Key used for upstream calls, empty values count as missing
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}
