use std::fs;

use rag::{
    current_unit_dir, load_unit, save_unit, ChunkMeta, FlatIndex, MetaBundle, RagError,
    CURRENT_FILE, INDEX_FILE, META_FILE,
};
use tempfile::TempDir;

fn sample_unit() -> (FlatIndex, MetaBundle) {
    let index = FlatIndex::build(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
    let bundle = MetaBundle {
        embed_model: "stub-v1".to_string(),
        texts: vec!["первый фрагмент".to_string(), "второй фрагмент".to_string()],
        metadata: vec![
            ChunkMeta {
                source: "texts/Найм/a.txt".to_string(),
                topic: "Найм".to_string(),
                chunk_id: "doc0_chunk0".to_string(),
            },
            ChunkMeta {
                source: "texts/Финансы/b.txt".to_string(),
                topic: "Финансы".to_string(),
                chunk_id: "doc1_chunk0".to_string(),
            },
        ],
    };
    (index, bundle)
}

#[test]
fn save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let (index, bundle) = sample_unit();
    save_unit(dir.path(), &index, &bundle).unwrap();

    let (loaded_index, loaded_bundle) = load_unit(dir.path()).unwrap();
    assert_eq!(loaded_index, index);
    assert_eq!(loaded_bundle, bundle);

    let query = [0.9, 0.1];
    assert_eq!(
        loaded_index.search(&query, 2).unwrap(),
        index.search(&query, 2).unwrap()
    );
}

#[test]
fn missing_unit_is_index_not_found() {
    let dir = TempDir::new().unwrap();
    let err = load_unit(dir.path()).unwrap_err();
    assert!(matches!(err, RagError::IndexNotFound(_)));
}

#[test]
fn missing_metadata_file_is_index_not_found() {
    let dir = TempDir::new().unwrap();
    let (index, bundle) = sample_unit();
    save_unit(dir.path(), &index, &bundle).unwrap();
    let gen_dir = current_unit_dir(dir.path()).unwrap();
    fs::remove_file(gen_dir.join(META_FILE)).unwrap();

    let err = load_unit(dir.path()).unwrap_err();
    assert!(matches!(err, RagError::IndexNotFound(_)));
}

#[test]
fn unpublished_generation_is_invisible() {
    // Both unit files written, but the marker was never repointed: the unit
    // must not be observable.
    let dir = TempDir::new().unwrap();
    let (index, bundle) = sample_unit();
    let gen_dir = dir.path().join("unit-0-0-0");
    fs::create_dir_all(&gen_dir).unwrap();
    fs::write(gen_dir.join(INDEX_FILE), index.to_bytes()).unwrap();
    fs::write(gen_dir.join(META_FILE), serde_json::to_vec(&bundle).unwrap()).unwrap();

    let err = load_unit(dir.path()).unwrap_err();
    assert!(matches!(err, RagError::IndexNotFound(_)));
}

#[test]
fn dangling_marker_is_index_not_found() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CURRENT_FILE), "unit-0-0-0").unwrap();

    let err = load_unit(dir.path()).unwrap_err();
    assert!(matches!(err, RagError::IndexNotFound(_)));
}

#[test]
fn republish_swaps_the_whole_unit_and_prunes_the_old_one() {
    let dir = TempDir::new().unwrap();
    let (index, bundle) = sample_unit();
    save_unit(dir.path(), &index, &bundle).unwrap();
    let first_gen = current_unit_dir(dir.path()).unwrap();

    let second_index = FlatIndex::build(&[vec![0.5, 0.5]]).unwrap();
    let second_bundle = MetaBundle {
        embed_model: "stub-v1".to_string(),
        texts: vec!["третий фрагмент".to_string()],
        metadata: vec![ChunkMeta {
            source: "texts/Найм/c.txt".to_string(),
            topic: "Найм".to_string(),
            chunk_id: "doc0_chunk0".to_string(),
        }],
    };
    save_unit(dir.path(), &second_index, &second_bundle).unwrap();

    // Both files now come from the second generation, and the first one is
    // gone: old index bytes can never pair with new metadata.
    let (loaded_index, loaded_bundle) = load_unit(dir.path()).unwrap();
    assert_eq!(loaded_index, second_index);
    assert_eq!(loaded_bundle, second_bundle);
    assert_ne!(current_unit_dir(dir.path()).unwrap(), first_gen);
    assert!(!first_gen.exists());

    let generations: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().is_dir())
        .collect();
    assert_eq!(generations.len(), 1);
}

#[test]
fn desynced_unit_is_a_corrupted_index() {
    let dir = TempDir::new().unwrap();
    let (index, mut bundle) = sample_unit();
    save_unit(dir.path(), &index, &bundle).unwrap();

    // Drop one text behind the index's back.
    bundle.texts.pop();
    bundle.metadata.pop();
    let gen_dir = current_unit_dir(dir.path()).unwrap();
    fs::write(gen_dir.join(META_FILE), serde_json::to_vec(&bundle).unwrap()).unwrap();

    let err = load_unit(dir.path()).unwrap_err();
    assert!(matches!(err, RagError::DimensionMismatch(_)));
}

#[test]
fn unparseable_metadata_is_a_corrupted_index() {
    let dir = TempDir::new().unwrap();
    let (index, bundle) = sample_unit();
    save_unit(dir.path(), &index, &bundle).unwrap();
    let gen_dir = current_unit_dir(dir.path()).unwrap();
    fs::write(gen_dir.join(META_FILE), b"{ not json").unwrap();

    let err = load_unit(dir.path()).unwrap_err();
    assert!(matches!(err, RagError::DimensionMismatch(_)));
}

#[test]
fn garbled_index_file_is_a_corrupted_index() {
    let dir = TempDir::new().unwrap();
    let (index, bundle) = sample_unit();
    save_unit(dir.path(), &index, &bundle).unwrap();
    let gen_dir = current_unit_dir(dir.path()).unwrap();
    fs::write(gen_dir.join(INDEX_FILE), b"garbage bytes").unwrap();

    // Surfaces as the corrupted-index error, never a crash.
    let err = load_unit(dir.path()).unwrap_err();
    assert!(matches!(err, RagError::DimensionMismatch(_)));
}

#[test]
fn save_refuses_a_desynced_unit() {
    let dir = TempDir::new().unwrap();
    let (index, mut bundle) = sample_unit();
    bundle.texts.pop();

    let err = save_unit(dir.path(), &index, &bundle).unwrap_err();
    assert!(matches!(err, RagError::DimensionMismatch(_)));
    assert!(load_unit(dir.path()).is_err());
}
