// Gemini mapper module
// Inbound prompt body -> generateContent payload

pub mod request;

pub use request::*;
