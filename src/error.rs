use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Only POST allowed")]
    MethodNotAllowed,

    #[error("Missing prompt")]
    MissingPrompt,

    #[error("Rate limit exceeded (demo).")]
    RateLimited,

    #[error("Server misconfigured: GEMINI_API_KEY missing")]
    MissingApiKey,

    #[error("Gemini returned error")]
    Upstream { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::MissingPrompt => StatusCode::BAD_REQUEST,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::MissingApiKey
            | AppError::Network(_)
            | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Every error leaves the handler as a JSON body, caller errors carry only `error`,
// upstream and internal failures add `details`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::MethodNotAllowed
            | AppError::MissingPrompt
            | AppError::RateLimited
            | AppError::MissingApiKey => json!({ "error": self.to_string() }),
            AppError::Upstream { body, .. } => json!({
                "error": self.to_string(),
                "details": body,
            }),
            AppError::Network(e) => json!({ "error": "AI proxy error", "details": e.to_string() }),
            AppError::Config(msg) => json!({ "error": "AI proxy error", "details": msg }),
        };

        (status, Json(body)).into_response()
    }
}

// Implement alias for Result to simplify usage
pub type AppResult<T> = Result<T, AppError>;
