use std::path::Path;

use crate::config::Config;
use crate::embed::{embed_query, Embedder};
use crate::error::RagError;
use crate::flat_index::FlatIndex;
use crate::store::{load_unit, ChunkMeta};

/// One retrieval hit: chunk text, its provenance, and the squared Euclidean
/// distance to the query.
#[derive(Clone, Debug)]
pub struct Retrieved {
    pub text: String,
    pub metadata: ChunkMeta,
    pub distance: f32,
}

/// Read-only view over a persisted index unit.
///
/// Loaded once at construction and never mutated afterwards, so concurrent
/// `search` calls need no locking.
pub struct Retriever {
    index: FlatIndex,
    texts: Vec<String>,
    metadata: Vec<ChunkMeta>,
    embedder: Box<dyn Embedder>,
}

impl std::fmt::Debug for Retriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retriever")
            .field("index", &self.index)
            .field("texts", &self.texts)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl Retriever {
    /// Loads the persisted unit from `store_dir` and binds the embedder that
    /// must match the one used at build time. Fails with `IndexNotFound`
    /// when the unit is absent and with the corrupted-index error when the
    /// unit was built with a different embedding model.
    pub fn open(cfg: &Config, embedder: Box<dyn Embedder>) -> Result<Self, RagError> {
        let (index, bundle) = load_unit(Path::new(&cfg.store_dir))?;
        if bundle.embed_model != cfg.embed_model {
            return Err(RagError::DimensionMismatch(format!(
                "index was built with embedding model '{}' but '{}' is configured; rebuild the index",
                bundle.embed_model, cfg.embed_model
            )));
        }
        Ok(Self {
            index,
            texts: bundle.texts,
            metadata: bundle.metadata,
            embedder,
        })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Embeds `query` and returns the `k` nearest chunks, closest first.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<Retrieved>, RagError> {
        let query_vec = embed_query(self.embedder.as_ref(), query)?;
        let hits = self.index.search(&query_vec, k)?;
        Ok(hits
            .into_iter()
            // Positions past the stored collections are dropped rather than
            // panicking; load_unit already guarantees the lengths agree.
            .filter(|(pos, _)| *pos < self.texts.len())
            .map(|(pos, distance)| Retrieved {
                text: self.texts[pos].clone(),
                metadata: self.metadata[pos].clone(),
                distance,
            })
            .collect())
    }
}
