use rag::{FlatIndex, RagError};

fn sample_index() -> FlatIndex {
    FlatIndex::build(&[
        vec![0.1, 0.7, 3.3333],
        vec![1.5, -0.25, 0.001],
        vec![0.1, 0.7, 3.3333],
        vec![-2.0, 4.125, 0.5],
    ])
    .unwrap()
}

#[test]
fn search_returns_ascending_distances() {
    let index = FlatIndex::build(&[vec![0.0, 3.0], vec![1.0, 0.0], vec![0.0, 0.5]]).unwrap();
    let hits = index.search(&[0.0, 0.0], 3).unwrap();
    let dists: Vec<f32> = hits.iter().map(|h| h.1).collect();
    for pair in dists.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    assert_eq!(hits[0].0, 2);
    assert_eq!(hits[1].0, 1);
    assert_eq!(hits[2].0, 0);
}

#[test]
fn ties_break_by_smaller_position() {
    let index = sample_index();
    // Positions 0 and 2 hold identical vectors: 0 must come first.
    let hits = index.search(&[0.1, 0.7, 3.3333], 4).unwrap();
    assert_eq!(hits[0], (0, 0.0));
    assert_eq!(hits[1], (2, 0.0));
}

#[test]
fn k_zero_returns_nothing() {
    assert!(sample_index().search(&[0.0, 0.0, 0.0], 0).unwrap().is_empty());
}

#[test]
fn k_larger_than_index_is_clamped() {
    let hits = sample_index().search(&[0.0, 0.0, 0.0], 100).unwrap();
    assert_eq!(hits.len(), 4);
}

#[test]
fn build_rejects_uneven_dimensions() {
    let err = FlatIndex::build(&[vec![1.0, 2.0], vec![1.0]]).unwrap_err();
    assert!(matches!(err, RagError::DimensionMismatch(_)));
}

#[test]
fn search_rejects_query_of_wrong_dimension() {
    let err = sample_index().search(&[1.0], 2).unwrap_err();
    assert!(matches!(err, RagError::DimensionMismatch(_)));
}

#[test]
fn serialize_round_trip_preserves_search_exactly() {
    let index = sample_index();
    let restored = FlatIndex::from_bytes(&index.to_bytes()).unwrap();
    assert_eq!(restored, index);

    let query = [0.3, -1.75, 2.5];
    let original = index.search(&query, 4).unwrap();
    let replayed = restored.search(&query, 4).unwrap();
    // Exact numeric equality: reconstruction must not alter stored vectors.
    assert_eq!(original, replayed);
}

#[test]
fn deserializing_garbage_is_a_corrupted_index() {
    for bytes in [&b"not an index"[..], &[][..]] {
        let err = FlatIndex::from_bytes(bytes).unwrap_err();
        assert!(matches!(err, RagError::DimensionMismatch(_)));
    }

    let mut truncated = sample_index().to_bytes();
    truncated.truncate(truncated.len() - 3);
    let err = FlatIndex::from_bytes(&truncated).unwrap_err();
    assert!(matches!(err, RagError::DimensionMismatch(_)));
}

#[test]
fn oversized_header_is_a_corrupted_index_not_a_panic() {
    // Valid magic and version, but dim and count claim far more payload
    // than the file holds: must come back as an error, never abort.
    let mut bytes = sample_index().to_bytes();
    bytes.truncate(16);
    bytes[8..12].copy_from_slice(&u32::MAX.to_le_bytes());
    bytes[12..16].copy_from_slice(&u32::MAX.to_le_bytes());

    let err = FlatIndex::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, RagError::DimensionMismatch(_)));
}

#[test]
fn header_payload_disagreement_is_a_corrupted_index() {
    // Header says one vector fewer than the payload carries.
    let mut bytes = sample_index().to_bytes();
    let count = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);
    bytes[12..16].copy_from_slice(&(count - 1).to_le_bytes());

    let err = FlatIndex::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, RagError::DimensionMismatch(_)));
}
