// Upstream client implementation
// Thin wrapper over the public Generative Language API

use reqwest::{header, Client, Response};
use serde_json::Value;
use tokio::time::Duration;
use url::Url;

use crate::error::{AppError, AppResult};
use crate::proxy::config::UpstreamProxyConfig;

// Production environment endpoint
pub const GENERATIVE_LANGUAGE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// Pinned model version
pub const GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

pub struct UpstreamClient {
    http_client: Client,
    base_url: String,
    model: String,
}

impl UpstreamClient {
    pub fn new(
        timeout_secs: u64,
        proxy_config: Option<UpstreamProxyConfig>,
    ) -> AppResult<Self> {
        Self::with_endpoint(
            GENERATIVE_LANGUAGE_BASE_URL,
            GEMINI_MODEL,
            timeout_secs,
            proxy_config,
        )
    }

    /// Client against an arbitrary base URL (test servers, regional endpoints)
    pub fn with_endpoint(
        base_url: &str,
        model: &str,
        timeout_secs: u64,
        proxy_config: Option<UpstreamProxyConfig>,
    ) -> AppResult<Self> {
        let mut builder = Client::builder().timeout(Duration::from_secs(timeout_secs));

        if let Some(config) = proxy_config {
            if config.enabled && !config.url.is_empty() {
                match reqwest::Proxy::all(&config.url) {
                    Ok(proxy) => {
                        builder = builder.proxy(proxy);
                        tracing::info!("UpstreamClient enabled proxy: {}", config.url);
                    }
                    Err(e) => {
                        tracing::error!("Invalid proxy address: {}, error: {}", config.url, e);
                    }
                }
            }
        }

        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    /// Build generateContent URL
    ///
    /// The key travels as the `key` query parameter, percent-encoded.
    fn build_url(base_url: &str, model: &str, api_key: &str) -> AppResult<Url> {
        let mut url = Url::parse(&format!("{}/models/{}:generateContent", base_url, model))
            .map_err(|e| AppError::Config(format!("Invalid upstream URL: {}", e)))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }

    pub fn generate_content_url(&self, api_key: &str) -> AppResult<Url> {
        Self::build_url(&self.base_url, &self.model, api_key)
    }

    /// POST a generateContent payload
    ///
    /// Only transport failures are errors here; HTTP status is left to the caller.
    pub async fn generate_content(&self, url: Url, body: &Value) -> AppResult<Response> {
        let response = self
            .http_client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            // The URL carries the key
            .map_err(|e| e.without_url())?;

        Ok(response)
    }
}
