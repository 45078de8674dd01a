// proxy module - Gemini prompt proxy service

pub mod config;
pub mod server;

pub mod common; // Rate limiting
pub mod handlers; // API endpoint handlers
pub mod mappers; // Request mapping
pub mod middleware; // Axum middleware
pub mod upstream; // Upstream client

pub use config::ProxyConfig;
pub use server::{AppState, AxumServer};
