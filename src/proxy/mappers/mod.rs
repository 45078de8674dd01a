// Protocol mappers

pub mod gemini;
