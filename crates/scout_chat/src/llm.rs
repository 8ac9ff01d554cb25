//! LLM gateway for chat completions.
//!
//! One primary remote backend (Groq, OpenAI-compatible) and an optional
//! local fallback (Ollama). The gateway's [`LlmGateway::generate`] is a
//! total function: every backend failure is absorbed here and converted
//! into user-facing text, so the conversation engine never sees an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ChatError, ChatResult};

/// Groq's OpenAI-compatible chat-completion endpoint.
pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default primary model. Override with `SCOUT_LLM_MODEL`.
pub const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";

/// Default Ollama base URL. Override with `SCOUT_OLLAMA_URL`.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default local fallback model. Override with `SCOUT_OLLAMA_MODEL`.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

/// Upper bound on tokens generated by the local fallback model.
pub const FALLBACK_MAX_NEW_TOKENS: u32 = 256;

/// Shown when the primary backend failed and the fallback also failed.
pub const DEGRADED_APOLOGY: &str =
    "⚠️ I'm having trouble reaching my language model right now. Please try again in a moment.";

/// Shown when the primary backend failed and no fallback model is loaded.
pub const UNAVAILABLE_APOLOGY: &str =
    "⚠️ No language model is available right now. Please check your API key or try again later.";

/// A text-generation backend: one prompt in, one completion out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Complete the given prompt.
    async fn complete(&self, prompt: &str) -> ChatResult<String>;

    /// Short backend name for logging.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Primary backend: Groq
// ---------------------------------------------------------------------------

/// Remote chat-completion backend talking to the Groq API.
pub struct GroqBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GroqBackend {
    /// Create a backend with an explicit credential and optional model override.
    pub fn new(api_key: impl Into<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
        }
    }

    /// Create a backend from `GROQ_API_KEY` and `SCOUT_LLM_MODEL`.
    ///
    /// A missing credential is not an error here: the request is still
    /// attempted and fails server-side, which routes into the fallback.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GROQ_API_KEY").unwrap_or_default();
        let model = std::env::var("SCOUT_LLM_MODEL").ok();
        Self::new(api_key, model)
    }

    /// Replace the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Get the current model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextCompletion for GroqBackend {
    async fn complete(&self, prompt: &str) -> ChatResult<String> {
        let request = GroqRequest {
            model: &self.model,
            messages: vec![GroqMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(GROQ_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Api {
                backend: "groq",
                status: status.as_u16(),
                body,
            });
        }

        let result: GroqResponse = response.json().await?;
        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(ChatError::EmptyCompletion("groq"))
    }

    fn name(&self) -> &'static str {
        "groq"
    }
}

#[derive(Debug, Serialize)]
struct GroqRequest<'a> {
    model: &'a str,
    messages: Vec<GroqMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct GroqMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    content: String,
}

// ---------------------------------------------------------------------------
// Fallback backend: Ollama
// ---------------------------------------------------------------------------

/// Local text-generation backend served by Ollama.
///
/// Availability is decided exactly once, by [`OllamaBackend::probe`] at
/// process start. A failed probe means the process runs without a fallback
/// for its whole lifetime; no further load attempts are made.
pub struct OllamaBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    /// Probe the Ollama server once and return a backend if it is reachable.
    pub async fn probe(base_url: impl Into<String>, model: Option<String>) -> ChatResult<Self> {
        let base_url = base_url.into();
        let client = reqwest::Client::new();

        let response = client
            .get(format!("{base_url}/api/tags"))
            .send()
            .await
            .map_err(|e| ChatError::FallbackUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChatError::FallbackUnavailable(format!(
                "ollama returned status {}",
                response.status()
            )));
        }

        Ok(Self {
            client,
            base_url,
            model: model.unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
        })
    }

    /// Probe using `SCOUT_OLLAMA_URL` and `SCOUT_OLLAMA_MODEL`.
    pub async fn from_env() -> ChatResult<Self> {
        let base_url =
            std::env::var("SCOUT_OLLAMA_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        let model = std::env::var("SCOUT_OLLAMA_MODEL").ok();
        Self::probe(base_url, model).await
    }

    /// Get the current model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextCompletion for OllamaBackend {
    async fn complete(&self, prompt: &str) -> ChatResult<String> {
        let request = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: OllamaOptions {
                num_predict: FALLBACK_MAX_NEW_TOKENS,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Api {
                backend: "ollama",
                status: status.as_u16(),
                body,
            });
        }

        let result: OllamaResponse = response.json().await?;
        Ok(result.response)
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

/// Two-tier text-generation gateway.
///
/// Tries the primary backend once; on any failure, tries the fallback once.
/// No retries within a backend and no caching of prompts.
pub struct LlmGateway {
    primary: Box<dyn TextCompletion>,
    fallback: Option<Box<dyn TextCompletion>>,
}

impl LlmGateway {
    /// Create a gateway from a primary backend and an optional fallback.
    pub fn new(primary: Box<dyn TextCompletion>, fallback: Option<Box<dyn TextCompletion>>) -> Self {
        Self { primary, fallback }
    }

    /// Whether a fallback model was loaded at startup.
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Complete the prompt, never failing.
    ///
    /// Backend errors are logged for the operator and replaced by one of
    /// two fixed apologies: degraded (fallback attempted and failed) or
    /// unavailable (no fallback loaded).
    pub async fn generate(&self, prompt: &str) -> String {
        match self.primary.complete(prompt).await {
            Ok(text) => {
                debug!(backend = self.primary.name(), "completion served by primary");
                text
            }
            Err(primary_err) => {
                warn!(
                    backend = self.primary.name(),
                    error = %primary_err,
                    "primary backend failed"
                );

                let Some(fallback) = &self.fallback else {
                    return UNAVAILABLE_APOLOGY.to_string();
                };

                match fallback.complete(prompt).await {
                    Ok(text) => {
                        debug!(backend = fallback.name(), "completion served by fallback");
                        text
                    }
                    Err(fallback_err) => {
                        warn!(
                            backend = fallback.name(),
                            error = %fallback_err,
                            "fallback backend failed"
                        );
                        DEGRADED_APOLOGY.to_string()
                    }
                }
            }
        }
    }
}
