//! Outbound suggestion generators.

pub mod gemini;

pub use gemini::GeminiGenerator;
