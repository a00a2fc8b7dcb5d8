use std::env;

use crate::error::RagError;

#[derive(Clone, Debug)]
pub struct Config {
    pub texts_dir: String,
    pub templates_dir: String,
    pub store_dir: String,
    pub include_exts: Vec<String>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub embed_batch_size: usize,
    pub top_k: usize,
    pub embed_url: String,
    pub embed_model: String,
    pub llm_url: String,
    pub llm_api_key: String,
    pub llm_model: String,
    pub system_prompt: String,
    pub fallback_answer: String,
}

impl Config {
    /// Reads configuration from the environment, loading `.env` first so the
    /// service credential works without a manual `source .env`.
    ///
    /// The LLM credential is the only required value; everything else has a
    /// working default.
    pub fn from_env() -> Result<Self, RagError> {
        let _ = dotenvy::dotenv();

        let llm_api_key = env::var("LLM_API_KEY").map_err(|_| {
            RagError::Configuration("LLM_API_KEY not found in environment".to_string())
        })?;

        let include_exts = env::var("RAG_INCLUDE_EXTS").unwrap_or_else(|_| ".txt".to_string());

        Ok(Self {
            texts_dir: env::var("RAG_TEXTS_DIR")
                .unwrap_or_else(|_| "data/knowledge_base/texts".to_string()),
            templates_dir: env::var("RAG_TEMPLATES_DIR")
                .unwrap_or_else(|_| "data/knowledge_base/templates".to_string()),
            store_dir: env::var("RAG_STORE_DIR")
                .unwrap_or_else(|_| "data/vector_store_cache".to_string()),
            include_exts: include_exts.split(',').map(|s| s.trim().to_string()).collect(),
            chunk_size: env::var("RAG_CHUNK_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            chunk_overlap: env::var("RAG_CHUNK_OVERLAP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(200),
            embed_batch_size: env::var("RAG_EMBED_BATCH_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(32),
            top_k: env::var("RAG_TOP_K").ok().and_then(|v| v.parse().ok()).unwrap_or(3),
            embed_url: env::var("EMBED_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            embed_model: env::var("EMBED_MODEL")
                .unwrap_or_else(|_| "nomic-embed-text".to_string()),
            llm_url: env::var("LLM_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
            llm_api_key,
            llm_model: env::var("LLM_MODEL_NAME").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            system_prompt: env::var("RAG_SYSTEM_PROMPT")
                .unwrap_or_else(|_| crate::build_prompt::DEFAULT_SYSTEM_PROMPT.to_string()),
            fallback_answer: env::var("RAG_FALLBACK_ANSWER")
                .unwrap_or_else(|_| crate::build_prompt::DEFAULT_FALLBACK_ANSWER.to_string()),
        })
    }
}
