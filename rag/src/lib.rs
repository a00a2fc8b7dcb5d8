mod answer;
mod build_index;
mod build_prompt;
mod chunk_text;
mod config;
mod embed;
mod error;
mod find_templates;
mod flat_index;
mod generate;
mod http;
mod intent;
mod retrieve;
mod scan_files;
mod store;

pub use answer::RagProcessor;
pub use build_index::{build_index, BuildSummary};
pub use build_prompt::{
    build_user_prompt, format_context, DEFAULT_FALLBACK_ANSWER, DEFAULT_SYSTEM_PROMPT,
};
pub use chunk_text::split_text;
pub use config::Config;
pub use embed::{embed_query, Embedder, HttpEmbedder};
pub use error::RagError;
pub use find_templates::find_templates;
pub use flat_index::FlatIndex;
pub use generate::{Generator, HttpGenerator};
pub use intent::{classify, Intent};
pub use retrieve::{Retrieved, Retriever};
pub use scan_files::{scan_documents, Document};
pub use store::{
    current_unit_dir, load_unit, save_unit, ChunkMeta, MetaBundle, CURRENT_FILE, INDEX_FILE,
    META_FILE,
};

/// Runs the offline indexing pipeline against the configured corpus using the
/// configured HTTP embedder.
pub fn index_corpus(cfg: &Config) -> Result<Option<BuildSummary>, RagError> {
    let embedder = HttpEmbedder::new(cfg);
    build_index(cfg, &embedder, None)
}

/// Opens the persisted index unit and wires up the serving-side processor
/// with the configured HTTP embedder and generator.
pub fn open_processor(cfg: &Config) -> Result<RagProcessor, RagError> {
    let retriever = Retriever::open(cfg, Box::new(HttpEmbedder::new(cfg)))?;
    let generator = Box::new(HttpGenerator::new(cfg));
    Ok(RagProcessor::new(cfg, retriever, generator))
}
