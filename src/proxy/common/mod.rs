// Common tools

pub mod rate_limiter;

pub use rate_limiter::{Clock, Decision, RateLimiter, SystemClock};
