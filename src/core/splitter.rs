//! Recursive separator-based text splitting.
//!
//! Splits text into ordered, non-overlapping chunks of at most
//! `chunk_size` characters, preferring natural break points: paragraph
//! boundaries first, then line breaks, then sentence ends, then a hard
//! character cut as the last resort. All sizes are measured in
//! **characters**, not bytes, so chunk boundaries never split a
//! multi-byte UTF-8 sequence.
//!
//! Concatenating the returned chunks reproduces the input exactly:
//! separators stay attached to the piece they terminate and no
//! whitespace is trimmed.

/// Separators tried in order before falling back to a hard cut
const SEPARATORS: [&str; 3] = ["\n\n", "\n", ". "];

/// Split text into chunks of at most `chunk_size` characters.
///
/// Returns an empty vector for empty input. Never panics on valid
/// UTF-8; a `chunk_size` of 0 yields no chunks.
pub fn split_text(text: &str, chunk_size: usize) -> Vec<String> {
    if text.is_empty() || chunk_size == 0 {
        return Vec::new();
    }

    let pieces = split_recursive(text, chunk_size, 0);
    merge_pieces(pieces, chunk_size)
}

/// Break text into pieces no longer than `chunk_size`, preferring the
/// separator at `depth` and recursing into finer separators for any
/// piece that is still too long.
fn split_recursive(text: &str, chunk_size: usize, depth: usize) -> Vec<String> {
    if char_len(text) <= chunk_size {
        return vec![text.to_string()];
    }

    if depth >= SEPARATORS.len() {
        return hard_cut(text, chunk_size);
    }

    let mut pieces = Vec::new();
    for part in text.split_inclusive(SEPARATORS[depth]) {
        if char_len(part) <= chunk_size {
            pieces.push(part.to_string());
        } else {
            pieces.extend(split_recursive(part, chunk_size, depth + 1));
        }
    }

    pieces
}

/// Greedily pack adjacent pieces into chunks without exceeding
/// `chunk_size`. Pieces arrive in document order, so chunks stay
/// ordered and lossless.
fn merge_pieces(pieces: Vec<String>, chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for piece in pieces {
        let piece_len = char_len(&piece);

        if current_len > 0 && current_len + piece_len > chunk_size {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        current.push_str(&piece);
        current_len += piece_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Fixed-width character cut, the last-resort separator.
///
/// Uses `char_indices()` so every boundary falls on a valid character
/// boundary regardless of multi-byte content.
fn hard_cut(text: &str, chunk_size: usize) -> Vec<String> {
    let char_indices: Vec<(usize, char)> = text.char_indices().collect();
    let mut pieces = Vec::new();
    let mut start_idx = 0;

    while start_idx < char_indices.len() {
        let end_idx = (start_idx + chunk_size).min(char_indices.len());

        let byte_start = char_indices[start_idx].0;
        let byte_end = if end_idx < char_indices.len() {
            char_indices[end_idx].0
        } else {
            text.len()
        };

        pieces.push(text[byte_start..byte_end].to_string());
        start_idx = end_idx;
    }

    pieces
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
