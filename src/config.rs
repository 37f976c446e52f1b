//! Immutable run configuration, built once at startup

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// Sampling parameters forwarded to the generation backend.
///
/// A temperature of 0.0 means greedy decoding: neither `temperature` nor
/// `top_p` is sent with the request in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f64,
    pub top_p: f64,
    pub max_new_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.8,
            max_new_tokens: 512,
        }
    }
}

/// Full configuration for one evaluation run.
///
/// Constructed once from CLI arguments and passed by reference into the
/// evaluation loop; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// Model identifier sent to the chat-completions endpoint
    pub model: String,
    /// Base URL of the OpenAI-compatible API (e.g. http://localhost:8000/v1)
    pub base_url: String,
    pub api_key: Option<String>,
    /// Prompt-style tag selecting a chain-of-thought template
    pub prompt_type: String,
    /// Dataset name, e.g. "college_math"
    pub data_name: String,
    /// Dataset split, e.g. "test"
    pub split: String,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Cap on the number of samples evaluated; None evaluates everything
    pub num_test_sample: Option<usize>,
    pub sampling: SamplingParams,
    /// Persist full raw generations to generations.jsonl
    pub save_outputs: bool,
}

impl EvalConfig {
    /// Endpoint URL for chat completions
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
