use async_trait::async_trait;

use super::error::ApiError;
use crate::models::Direction;

/// Shown when no API key is configured.
pub const MISSING_KEY_MESSAGE: &str =
    "API key missing. Set GEMINI_API_KEY to enable AI analysis.";

/// Shown when the provider call fails for any reason.
pub const FALLBACK_MESSAGE: &str = "Could not generate analysis at this time.";

/// A free-text analysis backend for planned trades.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Provider name for logging (e.g. "gemini").
    fn provider_name(&self) -> &str;

    /// Produce a short technical checklist for the planned trade.
    async fn analyze_bias(
        &self,
        pair: &str,
        direction: Direction,
        notes: &str,
    ) -> Result<String, ApiError>;
}
