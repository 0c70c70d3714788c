//! LLM collaborator configuration

use serde::{Deserialize, Serialize};

/// Supported LLM backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI-compatible chat completions API
    OpenAi,
    /// Local Ollama generate API
    Ollama,
}

/// Configuration for the LLM client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    /// Sampling temperature; 0.0 keeps translation and assessment stable
    #[serde(default)]
    pub temperature: f32,
}

impl LlmConfig {
    pub fn openai(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        LlmConfig {
            provider: LlmProvider::OpenAi,
            model: model.into(),
            api_key: Some(api_key.into()),
            api_base_url: None,
            temperature: 0.0,
        }
    }

    pub fn ollama(model: impl Into<String>) -> Self {
        LlmConfig {
            provider: LlmProvider::Ollama,
            model: model.into(),
            api_key: None,
            api_base_url: None,
            temperature: 0.0,
        }
    }

    /// Build a config from environment variables, if the key ones are set
    ///
    /// `FILIERA_LLM_PROVIDER` (openai|ollama, default openai),
    /// `FILIERA_LLM_MODEL`, `FILIERA_LLM_API_KEY`, `FILIERA_LLM_BASE_URL`.
    pub fn from_env() -> Option<Self> {
        let model = std::env::var("FILIERA_LLM_MODEL").ok()?;
        let provider = match std::env::var("FILIERA_LLM_PROVIDER").ok().as_deref() {
            Some("ollama") => LlmProvider::Ollama,
            _ => LlmProvider::OpenAi,
        };
        Some(LlmConfig {
            provider,
            model,
            api_key: std::env::var("FILIERA_LLM_API_KEY").ok(),
            api_base_url: std::env::var("FILIERA_LLM_BASE_URL").ok(),
            temperature: 0.0,
        })
    }

    /// The effective base URL: explicit override or the provider default
    pub fn base_url(&self) -> String {
        self.api_base_url.clone().unwrap_or_else(|| {
            match self.provider {
                LlmProvider::OpenAi => "https://api.openai.com/v1".to_string(),
                LlmProvider::Ollama => "http://localhost:11434".to_string(),
            }
        })
    }
}
