use serde::{Deserialize, Serialize};

// Request/response shapes for the generateContent REST endpoint.

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

impl GenerateContentResponse {
    /// Text of the first candidate, if the model returned one.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_candidate_text() {
        let raw = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [{"text": "- Check structure\n- Mark key levels"}],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }
            ]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            response.first_text(),
            Some("- Check structure\n- Mark key levels")
        );
    }

    #[test]
    fn empty_candidates_yield_none() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.first_text(), None);
    }
}
