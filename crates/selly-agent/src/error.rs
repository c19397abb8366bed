use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("API key not found: set {0}")]
    MissingApiKey(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Gemini returned no text (finish reason: {0})")]
    EmptyResponse(String),

    #[error("Failed to parse reply JSON: {source}\n  text: {text}")]
    Parse {
        text: String,
        #[source]
        source: serde_json::Error,
    },
}
