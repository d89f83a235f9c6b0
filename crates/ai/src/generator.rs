//! Chat-completions client.
//!
//! Speaks the OpenAI-compatible `/chat/completions` shape: a JSON body with a
//! model name and a list of role/content messages, authenticated with a
//! Bearer token. Only the first choice of the response is read.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::error::AiError;
use crate::types::{CompletionRequest, CompletionResponse};

/// Endpoint used when no custom base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Text generation seam consumed by the enrichment worker.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one completion and return the generated text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError>;
}

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// # Example
///
/// ```ignore
/// let client = ChatCompletionsClient::new("your-api-key".to_string());
/// let text = client.complete(request).await?;
/// ```
pub struct ChatCompletionsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ChatCompletionsClient {
    /// Create a client against the default endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom endpoint (proxy or self-hosted).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Extract `choices[0].message.content` from a response body.
    fn parse_content(body: &str) -> Result<String, AiError> {
        let response: CompletionResponse =
            serde_json::from_str(body).map_err(|e| AiError::MalformedResponse(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AiError::MalformedResponse("response carried no choices".to_string()))
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!("Requesting completion from {} (model {})", url, request.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::Transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(AiError::Endpoint { status, message });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AiError::Transport(e.to_string()))?;

        Self::parse_content(&body)
    }
}
