use std::path::Path;

use tracing::{info, warn};

use crate::chunk_text::split_text;
use crate::config::Config;
use crate::embed::Embedder;
use crate::error::RagError;
use crate::flat_index::FlatIndex;
use crate::scan_files::scan_documents;
use crate::store::{save_unit, ChunkMeta, MetaBundle};

/// What a completed build produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildSummary {
    pub documents: usize,
    pub chunks: usize,
}

/// Offline indexing pipeline: discover documents, chunk, embed, persist.
///
/// Returns `Ok(None)` without touching the store when the corpus yields no
/// documents or no chunks — a missing unit must read as "service
/// unavailable" downstream, never as "empty corpus means no answers".
pub fn build_index(
    cfg: &Config,
    embedder: &dyn Embedder,
    source: Option<&Path>,
) -> Result<Option<BuildSummary>, RagError> {
    let documents = scan_documents(cfg, source);
    if documents.is_empty() {
        warn!("no documents found under {}; nothing to index", cfg.texts_dir);
        return Ok(None);
    }
    info!(documents = documents.len(), "loaded corpus");

    let mut texts = Vec::new();
    let mut metadata = Vec::new();
    for (doc_idx, doc) in documents.iter().enumerate() {
        for (chunk_idx, chunk) in split_text(&doc.text, cfg.chunk_size, cfg.chunk_overlap)
            .into_iter()
            .enumerate()
        {
            if chunk.trim().is_empty() {
                continue;
            }
            texts.push(chunk);
            metadata.push(ChunkMeta {
                source: doc.source.clone(),
                topic: doc.topic.clone(),
                chunk_id: format!("doc{doc_idx}_chunk{chunk_idx}"),
            });
        }
    }
    if texts.is_empty() {
        warn!("no text chunks generated; nothing to index");
        return Ok(None);
    }
    info!(chunks = texts.len(), "chunked corpus");

    // Batched for throughput; order is preserved regardless of batch size.
    let mut vectors: Vec<Vec<f32>> = Vec::with_capacity(texts.len());
    for batch in texts.chunks(cfg.embed_batch_size.max(1)) {
        vectors.extend(embedder.encode(batch)?);
    }
    if vectors.len() != texts.len() {
        return Err(RagError::EmbeddingService(format!(
            "embedding service returned {} vectors for {} chunks",
            vectors.len(),
            texts.len()
        )));
    }

    let index = FlatIndex::build(&vectors)?;
    let summary = BuildSummary {
        documents: documents.len(),
        chunks: index.len(),
    };
    let bundle = MetaBundle {
        embed_model: cfg.embed_model.clone(),
        texts,
        metadata,
    };
    save_unit(Path::new(&cfg.store_dir), &index, &bundle)?;
    info!(
        vectors = index.len(),
        dim = index.dim(),
        store = %cfg.store_dir,
        "index unit persisted"
    );
    Ok(Some(summary))
}
