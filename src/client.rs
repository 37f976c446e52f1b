//! Client for OpenAI-compatible chat-completions backends

use crate::config::EvalConfig;
use crate::error::{MathEvalError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// OpenAI chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(text: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: text.to_string(),
        }
    }
}

/// OpenAI chat completion request
#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
}

/// OpenAI chat completion response
#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatMessageResponse {
    content: String,
}

/// Blocking-per-sample generation client.
///
/// One request in flight at a time, no retries, no timeout: a hang in the
/// backend blocks the whole run.
pub struct ModelClient {
    client: Client,
    url: String,
    model: String,
    api_key: Option<String>,
    temperature: f64,
    top_p: f64,
    max_tokens: u32,
}

impl ModelClient {
    pub fn new(config: &EvalConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.completions_url(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            temperature: config.sampling.temperature,
            top_p: config.sampling.top_p,
            max_tokens: config.sampling.max_new_tokens,
        }
    }

    /// Generate one completion for a prompt.
    ///
    /// Temperature 0.0 requests greedy decoding: temperature and top_p are
    /// omitted from the request entirely.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let do_sample = self.temperature > 0.0;
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: self.max_tokens,
            temperature: do_sample.then_some(self.temperature),
            top_p: do_sample.then_some(self.top_p),
        };

        let mut req = self.client.post(&self.url).json(&request);
        if let Some(ref api_key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(MathEvalError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: ChatCompletionResponse = response.json().await?;
        body.choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| MathEvalError::ApiError("No choices in response".to_string()))
    }
}
