#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// No API key was configured; nothing was sent.
    #[error("AI provider is not configured")]
    NotConfigured,

    #[error("AI request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("AI provider returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Invalid AI response: {0}")]
    InvalidResponse(String),

    #[error("AI response contained no content")]
    EmptyResponse,
}
