use rag::split_text;

/// Rebuilds the original text by stripping the shared overlap from every
/// chunk after the first. Overlap is counted in characters, matching the
/// splitter.
fn reassemble(chunks: &[String], overlap: usize) -> String {
    let mut out = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        if i == 0 {
            out.push_str(chunk);
        } else {
            out.extend(chunk.chars().skip(overlap));
        }
    }
    out
}

#[test]
fn empty_input_yields_no_chunks() {
    assert!(split_text("", 100, 20).is_empty());
}

#[test]
fn short_text_is_a_single_chunk() {
    let text = "Финансовый учет ведется ежемесячно.";
    let chunks = split_text(text, 100, 20);
    assert_eq!(chunks, vec![text.to_string()]);
}

#[test]
fn reconstructs_original_text() {
    let text = "Для найма горничной важно проверить рекомендации. \
                Обучение горничной должно включать стандарты уборки. \
                Финансовый учет ведется ежемесячно, а отчеты сдаются в конце квартала. \
                Хороший управляющий следит за заполняемостью объектов.";
    for (max_size, overlap) in [(50, 10), (60, 0), (35, 5)] {
        let chunks = split_text(text, max_size, overlap);
        assert!(chunks.len() > 1);
        assert_eq!(reassemble(&chunks, overlap), text);
    }
}

#[test]
fn chunks_respect_max_size() {
    let text = "слово ".repeat(200);
    for chunk in split_text(&text, 48, 12) {
        assert!(chunk.chars().count() <= 48, "oversized chunk: {chunk:?}");
    }
}

#[test]
fn adjacent_chunks_share_the_overlap_region() {
    let text = "один два три четыре пять шесть семь восемь девять десять ".repeat(5);
    let overlap = 8;
    let chunks = split_text(&text, 40, overlap);
    for pair in chunks.windows(2) {
        let tail: String = pair[0]
            .chars()
            .skip(pair[0].chars().count() - overlap)
            .collect();
        let head: String = pair[1].chars().take(overlap).collect();
        assert_eq!(tail, head);
    }
}

#[test]
fn prefers_a_paragraph_boundary() {
    let text = "Первый абзац совсем короткий.\n\nВторой абзац продолжает мысль дальше.";
    let chunks = split_text(text, 40, 0);
    assert!(chunks[0].ends_with("\n\n"), "chunk 0 was {:?}", chunks[0]);
    assert!(chunks[1].starts_with("Второй"));
}

#[test]
fn hard_splits_when_no_boundary_exists() {
    let text = "x".repeat(100);
    let chunks = split_text(&text, 30, 5);
    assert!(chunks.len() > 1);
    assert_eq!(chunks[0].chars().count(), 30);
    assert_eq!(reassemble(&chunks, 5), text);
}
