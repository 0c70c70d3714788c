//! LLM client for query translation, answer synthesis, and assessment

use super::prompt;
use super::traits::{AnswerSynthesizer, QueryTranslator};
use super::{NlqError, NlqResult};
use crate::config::{LlmConfig, LlmProvider};
use crate::graph::{Record, SchemaSummary};
use crate::query::Plan;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Thin chat-completion client over the configured provider
///
/// Cheap to clone; the underlying HTTP client is shared.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
    base_url: String,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> NlqResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| NlqError::Config(e.to_string()))?;
        let base_url = config.base_url();

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Send one prompt and return the raw completion text
    pub async fn complete(&self, system: &str, prompt: &str) -> NlqResult<String> {
        debug!(provider = ?self.config.provider, model = %self.config.model, "llm call");
        match self.config.provider {
            LlmProvider::OpenAi => self.openai_chat(system, prompt).await,
            LlmProvider::Ollama => self.ollama_generate(system, prompt).await,
        }
    }

    async fn openai_chat(&self, system: &str, prompt: &str) -> NlqResult<String> {
        #[derive(Serialize)]
        struct Message<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct Request<'a> {
            model: &'a str,
            messages: Vec<Message<'a>>,
            temperature: f32,
        }

        #[derive(Deserialize)]
        struct Response {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: MessageContent,
        }

        #[derive(Deserialize)]
        struct MessageContent {
            content: String,
        }

        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| NlqError::Config("OpenAI provider requires an API key".to_string()))?;

        let url = format!("{}/chat/completions", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&Request {
                model: &self.config.model,
                messages: vec![
                    Message {
                        role: "system",
                        content: system,
                    },
                    Message {
                        role: "user",
                        content: prompt,
                    },
                ],
                temperature: self.config.temperature,
            })
            .send()
            .await
            .map_err(|e| NlqError::Unavailable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(NlqError::Api(format!("OpenAI error: {}", resp.status())));
        }

        let result: Response = resp
            .json()
            .await
            .map_err(|e| NlqError::Api(e.to_string()))?;
        Ok(result
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default())
    }

    async fn ollama_generate(&self, system: &str, prompt: &str) -> NlqResult<String> {
        #[derive(Serialize)]
        struct Request<'a> {
            model: &'a str,
            prompt: &'a str,
            system: &'a str,
            stream: bool,
        }

        #[derive(Deserialize)]
        struct Response {
            response: String,
        }

        let url = format!("{}/api/generate", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&Request {
                model: &self.config.model,
                prompt,
                system,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| NlqError::Unavailable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(NlqError::Api(format!("Ollama error: {}", resp.status())));
        }

        let result: Response = resp
            .json()
            .await
            .map_err(|e| NlqError::Api(e.to_string()))?;
        Ok(result.response)
    }
}

#[async_trait]
impl QueryTranslator for LlmClient {
    async fn translate(&self, question: &str, schema: &SchemaSummary) -> NlqResult<Plan> {
        let reply = self
            .complete(
                "You translate questions into graph retrieval plans.",
                &prompt::translation_prompt(question, schema),
            )
            .await?;

        let cleaned = prompt::extract_json(&reply);
        let doc: serde_json::Value = serde_json::from_str(cleaned)
            .map_err(|e| NlqError::Translation(format!("plan is not valid JSON: {}", e)))?;
        Plan::from_json_value(&doc).map_err(|e| NlqError::Translation(e.to_string()))
    }
}

#[async_trait]
impl AnswerSynthesizer for LlmClient {
    async fn synthesize(&self, question: &str, records: &[Record]) -> NlqResult<String> {
        let answer = self
            .complete(
                "You are a supply chain expert for luxury fashion brands.",
                &prompt::synthesis_prompt(question, records),
            )
            .await?;
        Ok(answer.trim().to_string())
    }
}
