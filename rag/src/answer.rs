use tracing::{error, info};

use crate::build_prompt::{build_user_prompt, format_context};
use crate::config::Config;
use crate::generate::Generator;
use crate::retrieve::Retriever;

/// Ties retrieval and generation together: one instance per process,
/// constructed at startup and shared by reference with whatever dispatches
/// requests.
pub struct RagProcessor {
    retriever: Retriever,
    generator: Box<dyn Generator>,
    top_k: usize,
    system_prompt: String,
    fallback_answer: String,
}

impl RagProcessor {
    pub fn new(cfg: &Config, retriever: Retriever, generator: Box<dyn Generator>) -> Self {
        Self {
            retriever,
            generator,
            top_k: cfg.top_k,
            system_prompt: cfg.system_prompt.clone(),
            fallback_answer: cfg.fallback_answer.clone(),
        }
    }

    /// Answers a question grounded in the indexed corpus.
    ///
    /// Never fails: any per-request error (embedding or generation call) is
    /// logged and converted into the fixed fallback answer, so one failing
    /// request cannot affect other sessions. Zero retrieved chunks still go
    /// to the generator with an empty context — the grounding directive then
    /// makes the model say it cannot answer from the available material.
    pub fn answer(&self, question: &str) -> String {
        let chunks = match self.retriever.search(question, self.top_k) {
            Ok(chunks) => chunks,
            Err(err) => {
                error!(%err, "retrieval failed");
                return self.fallback_answer.clone();
            }
        };
        info!(question, retrieved = chunks.len(), "answering question");

        let context = format_context(&chunks);
        let user_prompt = build_user_prompt(&context, question);
        match self.generator.complete(&self.system_prompt, &user_prompt) {
            Ok(answer) => answer,
            Err(err) => {
                error!(%err, "generation failed");
                self.fallback_answer.clone()
            }
        }
    }
}
