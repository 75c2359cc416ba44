pub mod client;
pub mod error;
pub mod gemini;

pub use client::{AnalysisProvider, FALLBACK_MESSAGE, MISSING_KEY_MESSAGE};
pub use error::ApiError;
pub use gemini::GeminiClient;
