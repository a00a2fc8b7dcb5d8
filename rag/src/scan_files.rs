use std::fs;
use std::path::Path;

use tracing::warn;
use walkdir::WalkDir;

use crate::config::Config;

/// A corpus document: raw text plus provenance. Read once per build run and
/// dropped after chunking.
#[derive(Clone, Debug)]
pub struct Document {
    pub text: String,
    pub source: String,
    pub topic: String,
}

/// Recursively collects text documents under `root` (or the configured
/// corpus directory). The immediate parent directory name becomes the topic
/// label. Files that fail to decode are skipped with a warning, not fatal.
pub fn scan_documents(cfg: &Config, root: Option<&Path>) -> Vec<Document> {
    let base = root.unwrap_or_else(|| Path::new(&cfg.texts_dir));
    let mut docs = Vec::new();

    for entry in WalkDir::new(base)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !has_included_ext(path, &cfg.include_exts) {
            continue;
        }
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path.display(), %err, "skipping unreadable document");
                continue;
            }
        };
        if text.trim().is_empty() {
            continue;
        }
        let topic = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        docs.push(Document {
            text,
            source: path.to_string_lossy().to_string(),
            topic,
        });
    }

    docs
}

fn has_included_ext(path: &Path, exts: &[String]) -> bool {
    let lower = path.to_string_lossy().to_lowercase();
    exts.iter().any(|ext| lower.ends_with(ext))
}
