//! Error types for the conversation engine.

use thiserror::Error;

/// Result type alias for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Errors that can occur while talking to a text-generation backend.
///
/// These never cross the gateway boundary: [`crate::llm::LlmGateway::generate`]
/// absorbs every variant and turns it into user-facing text.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend '{backend}' returned status {status}: {body}")]
    Api {
        backend: &'static str,
        status: u16,
        body: String,
    },

    #[error("Backend '{0}' returned an empty completion")]
    EmptyCompletion(&'static str),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Local fallback model is not available: {0}")]
    FallbackUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChatError::Api {
            backend: "groq",
            status: 401,
            body: "invalid api key".to_string(),
        };
        assert!(err.to_string().contains("groq"));
        assert!(err.to_string().contains("401"));

        let err = ChatError::FallbackUnavailable("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
