use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Finds template files whose names contain every keyword, case-insensitive.
/// A filename-only substring scan: templates are pre-authored documents and
/// their names are the search surface.
pub fn find_templates(root: &Path, keywords: &[String]) -> Vec<PathBuf> {
    if keywords.is_empty() {
        return Vec::new();
    }
    let needles: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_string_lossy().to_lowercase();
            needles.iter().all(|kw| name.contains(kw))
        })
        .map(|e| e.into_path())
        .collect();
    found.sort();
    found
}
