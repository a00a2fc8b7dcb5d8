use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::RagError;
use crate::flat_index::FlatIndex;

pub const INDEX_FILE: &str = "index.fidx";
pub const META_FILE: &str = "chunks.json";
pub const CURRENT_FILE: &str = "CURRENT";

static GENERATION_SEQ: AtomicU64 = AtomicU64::new(0);

/// Per-chunk provenance, stored in index-position order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMeta {
    pub source: String,
    pub topic: String,
    pub chunk_id: String,
}

/// Texts and metadata parallel to the index, persisted as one JSON document
/// so they can never drift from each other. `embed_model` records the model
/// the vectors were built with; the reader refuses a different model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetaBundle {
    pub embed_model: String,
    pub texts: Vec<String>,
    pub metadata: Vec<ChunkMeta>,
}

/// Writes the index and the bundle under `dir`, replacing any previous unit.
///
/// Both files land in a fresh generation subdirectory; the unit becomes
/// visible only through the single atomic rename of the `CURRENT` marker
/// pointing at that subdirectory. A reader therefore sees the previous
/// complete unit or the new complete one, never a mix of the two files —
/// and concurrent builders each publish a whole generation, with the last
/// marker rename winning.
pub fn save_unit(dir: &Path, index: &FlatIndex, bundle: &MetaBundle) -> Result<(), RagError> {
    if index.len() != bundle.texts.len() || index.len() != bundle.metadata.len() {
        return Err(RagError::DimensionMismatch(format!(
            "refusing to persist desynced unit: index={} texts={} metadata={}",
            index.len(),
            bundle.texts.len(),
            bundle.metadata.len()
        )));
    }
    fs::create_dir_all(dir)?;

    let generation = generation_name();
    let gen_dir = dir.join(&generation);
    fs::create_dir(&gen_dir)?;
    fs::write(gen_dir.join(INDEX_FILE), index.to_bytes())?;
    let meta_json = serde_json::to_vec_pretty(bundle)
        .map_err(|e| RagError::DimensionMismatch(format!("failed to encode metadata: {e}")))?;
    fs::write(gen_dir.join(META_FILE), meta_json)?;

    let marker_tmp = dir.join(format!("{CURRENT_FILE}.{}.tmp", process::id()));
    fs::write(&marker_tmp, &generation)?;
    fs::rename(&marker_tmp, dir.join(CURRENT_FILE))?;

    prune_stale_generations(dir);
    Ok(())
}

/// Resolves the generation directory the `CURRENT` marker points at.
/// Missing marker or missing unit files both mean the unit is absent or
/// incomplete, which is `IndexNotFound` (operator: run the builder).
pub fn current_unit_dir(dir: &Path) -> Result<PathBuf, RagError> {
    let marker = dir.join(CURRENT_FILE);
    if !marker.is_file() {
        return Err(RagError::IndexNotFound(dir.to_path_buf()));
    }
    let generation = fs::read_to_string(&marker)?.trim().to_string();
    let gen_dir = dir.join(generation);
    if !gen_dir.join(INDEX_FILE).is_file() || !gen_dir.join(META_FILE).is_file() {
        return Err(RagError::IndexNotFound(dir.to_path_buf()));
    }
    Ok(gen_dir)
}

/// Loads the persisted unit from `dir`.
///
/// Absence of the published unit is `IndexNotFound` (operator: run the
/// builder). A parse failure or a length disagreement between the index and
/// the bundle is a corrupted-index condition, surfaced distinctly so
/// operators know to rebuild rather than re-create files.
pub fn load_unit(dir: &Path) -> Result<(FlatIndex, MetaBundle), RagError> {
    let gen_dir = current_unit_dir(dir)?;

    let index = FlatIndex::from_bytes(&fs::read(gen_dir.join(INDEX_FILE))?)?;
    let meta_raw = fs::read(gen_dir.join(META_FILE))?;
    let bundle: MetaBundle = serde_json::from_slice(&meta_raw)
        .map_err(|e| RagError::DimensionMismatch(format!("failed to decode metadata: {e}")))?;

    if index.len() != bundle.texts.len() || index.len() != bundle.metadata.len() {
        return Err(RagError::DimensionMismatch(format!(
            "index holds {} vectors but bundle holds {} texts / {} metadata records",
            index.len(),
            bundle.texts.len(),
            bundle.metadata.len()
        )));
    }
    Ok((index, bundle))
}

fn generation_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = GENERATION_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("unit-{}-{}-{}", process::id(), nanos, seq)
}

/// Best-effort removal of generation directories no longer referenced by the
/// marker. Serving processes read the unit once at startup, so nothing holds
/// an old generation open past its own load.
fn prune_stale_generations(dir: &Path) {
    let keep = match current_unit_dir(dir) {
        Ok(gen_dir) => gen_dir,
        Err(_) => return,
    };
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir()
            && path != keep
            && entry.file_name().to_string_lossy().starts_with("unit-")
        {
            let _ = fs::remove_dir_all(&path);
        }
    }
}
