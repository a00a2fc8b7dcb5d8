use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::RagError;
use crate::http::post_json;

/// Single-shot text completion boundary: no state is retained between calls.
pub trait Generator: Send + Sync {
    fn complete(&self, system: &str, user: &str) -> Result<String, RagError>;
}

/// Chat-completion client for an OpenAI-compatible endpoint.
pub struct HttpGenerator {
    url: String,
    api_key: String,
    model: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl HttpGenerator {
    pub fn new(cfg: &Config) -> Self {
        Self {
            url: cfg.llm_url.clone(),
            api_key: cfg.llm_api_key.clone(),
            model: cfg.llm_model.clone(),
        }
    }
}

impl Generator for HttpGenerator {
    fn complete(&self, system: &str, user: &str) -> Result<String, RagError> {
        let messages = [
            Message {
                role: "system".to_string(),
                content: system.to_string(),
            },
            Message {
                role: "user".to_string(),
                content: user.to_string(),
            },
        ];
        let req = ChatRequest {
            model: &self.model,
            messages: &messages,
            temperature: 0.7,
        };
        let res = post_json::<ChatResponse, _>(&self.url, &req, Some(self.api_key.as_str()))
            .map_err(RagError::GenerationService)?;
        let content = res
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                RagError::GenerationService("completion response carried no content".to_string())
            })?;
        Ok(content.trim().to_string())
    }
}
