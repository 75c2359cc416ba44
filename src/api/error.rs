use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid API response: {0}")]
    ParseError(String),

    #[error("API key missing")]
    MissingApiKey,

    #[error("Provider error: {code} - {message}")]
    ProviderError { code: String, message: String },
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::ParseError(err.to_string())
    }
}
