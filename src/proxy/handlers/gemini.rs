// Gemini prompt proxy handler
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::Method,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{AppError, AppResult};
use crate::proxy::mappers::gemini::{build_payload, parse_body, PromptRequest};
use crate::proxy::server::AppState;

/// Forward `{prompt, systemInstruction?}` to generateContent and relay the result
///
/// Accepts any method so that non-POST calls get the JSON 405 body instead of
/// the router's empty one. Body rejections (over the size limit, broken
/// stream) are handled here too, so they also end up as JSON.
pub async fn handle_prompt(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match forward_prompt(&state, &method, body).await {
        Ok(json) => Json(json).into_response(),
        Err(e) => {
            match &e {
                AppError::Network(_) | AppError::Config(_) => error!("Proxy error: {}", e),
                AppError::MissingApiKey => error!("{}", e),
                // Already logged with the upstream body
                AppError::Upstream { status, .. } => debug!("Relayed upstream status {}", status),
                _ => debug!("Rejected request: {}", e),
            }
            e.into_response()
        }
    }
}

async fn forward_prompt(
    state: &AppState,
    method: &Method,
    raw_body: Result<Bytes, BytesRejection>,
) -> AppResult<Value> {
    // 1. Method
    if *method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    // 2. Body, unreadable or malformed input degrades to {}
    let raw_body = raw_body.unwrap_or_else(|rejection| {
        warn!("Unreadable request body: {}", rejection.body_text());
        Bytes::new()
    });
    let body = parse_body(&raw_body);
    let request = PromptRequest::from_body(&body)?;

    // 3. Key and URL
    let api_key = state
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(AppError::MissingApiKey)?;
    let url = state.upstream.generate_content_url(api_key)?;
    let payload = build_payload(&request);

    // 4. Local budget
    let decision = state.rate_limiter.acquire().await;
    if !decision.is_allowed() {
        warn!("Local rate limit hit: {:?}", decision);
        return Err(AppError::RateLimited);
    }

    // 5. Upstream call
    let response = state.upstream.generate_content(url, &payload).await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.map_err(|e| e.without_url())?;
        error!("Gemini API error {}: {}", status.as_u16(), error_text);
        return Err(AppError::Upstream {
            status: status.as_u16(),
            body: error_text,
        });
    }

    // Forward the Gemini response as-is
    let json: Value = response.json().await.map_err(|e| e.without_url())?;
    Ok(json)
}
