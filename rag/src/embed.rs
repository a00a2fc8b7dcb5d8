use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::RagError;
use crate::http::post_json;

/// Pluggable embedding boundary: a pure function of text for a fixed model
/// identifier. The same implementation must serve both the index build and
/// query-time encoding, or distances are meaningless.
pub trait Embedder: Send + Sync {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RagError>;
}

/// Embeds a single query text, expecting exactly one vector back.
pub fn embed_query(embedder: &dyn Embedder, text: &str) -> Result<Vec<f32>, RagError> {
    let vecs = embedder.encode(std::slice::from_ref(&text.to_string()))?;
    vecs.into_iter().next().ok_or_else(|| {
        RagError::EmbeddingService("embedding service returned no vector".to_string())
    })
}

/// HTTP embedder against an Ollama-style embeddings endpoint.
pub struct HttpEmbedder {
    url: String,
    model: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Serialize)]
struct EmbedLegacyRequest<'a> {
    model: &'a str,
    prompt: &'a [String],
}

impl HttpEmbedder {
    pub fn new(cfg: &Config) -> Self {
        Self {
            url: cfg.embed_url.clone(),
            model: cfg.embed_model.clone(),
        }
    }
}

impl Embedder for HttpEmbedder {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RagError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        let url = format!("{}/api/embed", self.url);
        let req = EmbedRequest {
            model: &self.model,
            input: texts,
        };
        let value = match post_json::<Value, _>(&url, &req, None) {
            Ok(value) => value,
            Err(_) => {
                // Older servers only speak the legacy endpoint.
                let url = format!("{}/api/embeddings", self.url);
                let req = EmbedLegacyRequest {
                    model: &self.model,
                    prompt: texts,
                };
                post_json::<Value, _>(&url, &req, None).map_err(RagError::EmbeddingService)?
            }
        };
        parse_embeddings(value)
    }
}

fn parse_embeddings(value: Value) -> Result<Vec<Vec<f32>>, RagError> {
    let rows = value
        .get("embeddings")
        .or_else(|| value.get("embedding"))
        .ok_or_else(|| RagError::EmbeddingService("no embeddings in response".to_string()))?;
    let arr = rows
        .as_array()
        .ok_or_else(|| RagError::EmbeddingService("embeddings is not an array".to_string()))?;
    if arr.is_empty() {
        return Ok(vec![]);
    }
    if arr[0].is_array() {
        arr.iter().map(parse_vec).collect()
    } else {
        Ok(vec![parse_vec(rows)?])
    }
}

fn parse_vec(value: &Value) -> Result<Vec<f32>, RagError> {
    let arr = value
        .as_array()
        .ok_or_else(|| RagError::EmbeddingService("embedding is not an array".to_string()))?;
    arr.iter()
        .map(|v| {
            v.as_f64()
                .map(|n| n as f32)
                .ok_or_else(|| {
                    RagError::EmbeddingService("embedding value is not a number".to_string())
                })
        })
        .collect()
}
