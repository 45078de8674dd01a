use crate::proxy::common::RateLimiter;
use crate::proxy::upstream::UpstreamClient;
use crate::proxy::ProxyConfig;
use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Json, Response},
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

/// Axum application state
#[derive(Clone)]
pub struct AppState {
    /// Per-process call budget, shared by every request
    pub rate_limiter: Arc<RateLimiter>,
    pub upstream: Arc<UpstreamClient>,
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn from_config(config: &ProxyConfig) -> crate::error::AppResult<Self> {
        Ok(Self {
            rate_limiter: Arc::new(RateLimiter::with_system_clock(
                config.rate_limit.max_requests,
                config.rate_limit.window_ms,
            )),
            upstream: Arc::new(UpstreamClient::new(
                config.request_timeout,
                Some(config.upstream_proxy.clone()),
            )?),
            api_key: config.api_key().map(Arc::from),
        })
    }
}

/// Build routes
pub fn build_router(state: AppState) -> Router {
    use crate::proxy::handlers;

    Router::new()
        .route("/gemini-proxy", any(handlers::gemini::handle_prompt))
        // Path used by existing front-ends
        .route(
            "/.netlify/functions/gemini-proxy",
            any(handlers::gemini::handle_prompt),
        )
        .route("/healthz", get(health_check_handler))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(
            crate::proxy::middleware::request_logger,
        ))
        .layer(crate::proxy::middleware::cors_layer())
        .with_state(state)
}

/// Axum server instance
pub struct AxumServer {
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl AxumServer {
    /// Start Axum server
    pub async fn start(
        host: String,
        port: u16,
        state: AppState,
    ) -> Result<(Self, tokio::task::JoinHandle<()>), String> {
        let app = build_router(state);

        // Bind address
        let addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| format!("Failed to bind address {}: {}", addr, e))?;

        let local_addr = listener
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or(addr);
        tracing::info!("Gemini proxy server started at http://{}", local_addr);

        // Create shutdown channel
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let server_instance = Self {
            shutdown_tx: Some(shutdown_tx),
        };

        // Start server in new task
        let handle = tokio::spawn(async move {
            use hyper::server::conn::http1;
            use hyper_util::rt::TokioIo;
            use hyper_util::service::TowerToHyperService;

            loop {
                tokio::select! {
                    res = listener.accept() => {
                        match res {
                            Ok((stream, _)) => {
                                let io = TokioIo::new(stream);
                                let service = TowerToHyperService::new(app.clone());

                                tokio::task::spawn(async move {
                                    if let Err(err) = http1::Builder::new()
                                        .serve_connection(io, service)
                                        .await
                                    {
                                        debug!("Connection handling finished or errored: {:?}", err);
                                    }
                                });
                            }
                            Err(e) => {
                                error!("Failed to accept connection: {:?}", e);
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::info!("Gemini proxy server stopped listening");
                        break;
                    }
                }
            }
        });

        Ok((server_instance, handle))
    }

    /// Stop server
    pub fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Health check handler
async fn health_check_handler() -> Response {
    Json(serde_json::json!({
        "status": "ok"
    }))
    .into_response()
}
