use async_trait::async_trait;

use crate::api::{client::AnalysisProvider, error::ApiError};
use crate::models::Direction;

use super::types::{Content, GenerateContentRequest, GenerateContentResponse, Part};

const BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MODEL: &str = "gemini-2.5-flash";

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub struct GeminiClient {
    api_key: String,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http_client: reqwest::Client::new(),
        }
    }

    /// Build a client from the environment, or report the missing key.
    pub fn from_env() -> Result<Self, ApiError> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Self::new)
            .ok_or(ApiError::MissingApiKey)
    }

    fn build_prompt(pair: &str, direction: Direction, notes: &str) -> String {
        format!(
            "I am a professional trader planning a trade.\n\
             Pair: {}\n\
             Bias Direction: {}\n\
             My Notes: {}\n\n\
             Please provide a concise technical analysis checklist (max 3 bullet points) \
             of what I should look for before entering this {} trade. \
             Keep it strictly technical (Structure, Key Levels, Price Action).",
            pair,
            direction.as_str(),
            notes,
            direction.as_str()
        )
    }
}

#[async_trait]
impl AnalysisProvider for GeminiClient {
    fn provider_name(&self) -> &str {
        "gemini"
    }

    async fn analyze_bias(
        &self,
        pair: &str,
        direction: Direction,
        notes: &str,
    ) -> Result<String, ApiError> {
        let url = format!("{}/v1beta/models/{}:generateContent", BASE_URL, MODEL);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::build_prompt(pair, direction, notes),
                }],
            }],
        };

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::ProviderError {
                code: status.as_u16().to_string(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        body.first_text()
            .map(|text| text.trim().to_string())
            .ok_or_else(|| ApiError::ParseError("response contained no candidates".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_pair_direction_and_notes() {
        let prompt = GeminiClient::build_prompt("EURUSD", Direction::Short, "supply zone retest");
        assert!(prompt.contains("Pair: EURUSD"));
        assert!(prompt.contains("Bias Direction: SHORT"));
        assert!(prompt.contains("supply zone retest"));
        assert!(prompt.contains("entering this SHORT trade"));
    }
}
