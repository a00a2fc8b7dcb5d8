/// Splits `text` into overlapping windows of at most `max_size` characters.
///
/// Break points are searched backward from the window edge, preferring a
/// paragraph break, then a sentence end, then any whitespace; if no boundary
/// exists inside the window the text is hard-split at `max_size`. Each chunk
/// after the first starts `overlap` characters before the end of the previous
/// chunk, so concatenating the chunks with the overlap stripped reconstructs
/// the input exactly.
///
/// Indices are character-based, not byte-based: the corpus is Cyrillic.
pub fn split_text(text: &str, max_size: usize, overlap: usize) -> Vec<String> {
    if max_size == 0 {
        return vec![text.to_string()];
    }
    let overlap = if overlap >= max_size { max_size / 4 } else { overlap };

    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut chunks = Vec::new();
    let mut start = 0usize;

    while start < len {
        if len - start <= max_size {
            chunks.push(chars[start..len].iter().collect());
            break;
        }
        let end = split_point(&chars, start, start + max_size);
        chunks.push(chars[start..end].iter().collect());
        // A chunk no longer than the overlap would never advance; drop the
        // overlap for that step instead of looping forever.
        let back = if end - start > overlap { overlap } else { 0 };
        start = end - back;
    }

    chunks
}

/// Largest boundary position in `(start, limit]`, falling back to a hard
/// split at `limit`.
fn split_point(chars: &[char], start: usize, limit: usize) -> usize {
    let passes: [fn(&[char], usize) -> bool; 3] =
        [is_paragraph_break, is_sentence_break, is_word_break];
    for pass in passes {
        let mut p = limit;
        while p > start {
            if pass(chars, p) {
                return p;
            }
            p -= 1;
        }
    }
    limit
}

fn is_paragraph_break(chars: &[char], p: usize) -> bool {
    p >= 2 && chars[p - 1] == '\n' && chars[p - 2] == '\n'
}

fn is_sentence_break(chars: &[char], p: usize) -> bool {
    p >= 2 && chars[p - 1].is_whitespace() && matches!(chars[p - 2], '.' | '!' | '?' | '…')
}

fn is_word_break(chars: &[char], p: usize) -> bool {
    chars[p - 1].is_whitespace()
}
