//! # FAQ loading and chunking
//!
//! Reads a single UTF-8 FAQ file and splits it into overlapping windows of
//! text suitable for embedding. Windows hold at most [`CHUNK_SIZE`]
//! characters and consecutive windows share exactly [`CHUNK_OVERLAP`]
//! characters, so a sentence that straddles a cut still appears whole in one
//! of its neighbors.
//!
//! Cuts prefer paragraph/line boundaries, then any whitespace, and only fall
//! back to a raw character cut when the window contains neither. All offsets
//! are counted in Unicode scalar values, never bytes, so multi-byte text is
//! never sliced mid-character.
//!
//! Chunk order follows document order; position *i* in the returned sequence
//! is position *i* in the vector index built from it.

use std::{error::Error, fs, path::Path};
use tracing::info;

/// Maximum chunk length, in characters.
pub const CHUNK_SIZE: usize = 500;

/// Characters shared between consecutive chunks.
pub const CHUNK_OVERLAP: usize = 50;

/// Load a FAQ file and split it into overlapping chunks.
///
/// # Errors
/// Fails if the file does not exist or cannot be read. There is no retry;
/// a missing FAQ file is fatal at startup.
pub fn load_chunks(path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let chunks = split_text(&text, CHUNK_SIZE, CHUNK_OVERLAP);
    info!("Loaded {} FAQ chunks from {}", chunks.len(), path.display());
    Ok(chunks)
}

/// Split `text` into windows of at most `chunk_size` characters with exactly
/// `overlap` characters shared between consecutive windows.
///
/// The final chunk may be shorter than `chunk_size`. An empty input yields
/// no chunks. `overlap` must be smaller than `chunk_size` or the window
/// start could never advance.
pub fn split_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    debug_assert!(overlap < chunk_size);

    let offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    if n == 0 {
        return Vec::new();
    }

    let byte_at = |pos: usize| {
        if pos == n {
            text.len()
        } else {
            offsets[pos]
        }
    };

    let mut chunks = Vec::new();
    let mut start = 0;
    while n - start > chunk_size {
        let end = cut_point(&chars, start, start + chunk_size, overlap);
        chunks.push(text[byte_at(start)..byte_at(end)].to_string());
        start = end - overlap;
    }
    chunks.push(text[byte_at(start)..].to_string());
    chunks
}

/// Pick the cut position for the window starting at `start`.
///
/// Cutting at `p` means the chunk covers char positions `[start, p)`. The
/// first pass looks for a line break, the second for any whitespace, both
/// scanning backward from the character limit. `p` never drops to
/// `start + overlap` or below, which keeps the next window moving forward.
fn cut_point(chars: &[char], start: usize, hard_end: usize, overlap: usize) -> usize {
    let floor = start + overlap;
    let passes: [fn(char) -> bool; 2] = [|c| c == '\n', |c| c.is_whitespace()];
    for boundary in passes {
        let mut p = hard_end;
        while p > floor + 1 {
            if boundary(chars[p - 1]) {
                return p;
            }
            p -= 1;
        }
    }
    hard_end
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn char_len(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        assert!(split_text("", CHUNK_SIZE, CHUNK_OVERLAP).is_empty());
    }

    #[test]
    fn test_short_input_is_one_chunk() {
        let text = "Refunds are processed within 5 business days.";
        let chunks = split_text(text, CHUNK_SIZE, CHUNK_OVERLAP);
        assert_eq!(chunks, vec![text.to_string()]);
    }

    #[test]
    fn test_chunk_size_and_overlap_invariants() {
        let sentence = "Orders placed before noon ship the same day. ";
        let text = sentence.repeat(80); // 3600 chars
        let chunks = split_text(&text, CHUNK_SIZE, CHUNK_OVERLAP);
        assert!(chunks.len() > 1);

        for chunk in &chunks {
            assert!(char_len(chunk) <= CHUNK_SIZE);
        }

        // Consecutive chunks share exactly CHUNK_OVERLAP characters.
        for pair in chunks.windows(2) {
            let tail: String = pair[0]
                .chars()
                .skip(char_len(&pair[0]) - CHUNK_OVERLAP)
                .collect();
            let head: String = pair[1].chars().take(CHUNK_OVERLAP).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn test_chunks_reassemble_document() {
        let sentence = "Deliveries arrive between 9am and 5pm on weekdays. ";
        let text = sentence.repeat(40);
        let chunks = split_text(&text, CHUNK_SIZE, CHUNK_OVERLAP);

        // Dropping each chunk's leading overlap reconstructs the document.
        let mut rebuilt = chunks[0].clone();
        for chunk in &chunks[1..] {
            rebuilt.extend(chunk.chars().skip(CHUNK_OVERLAP));
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_prefers_paragraph_boundary() {
        let text = format!("{}\n\n{}", "a".repeat(300), "b".repeat(400));
        let chunks = split_text(&text, CHUNK_SIZE, CHUNK_OVERLAP);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].ends_with("\n\n"));
        assert_eq!(char_len(&chunks[0]), 302);
    }

    #[test]
    fn test_raw_cut_without_boundaries() {
        // No whitespace anywhere forces the raw character cut.
        let text = "δ".repeat(750);
        let chunks = split_text(&text, CHUNK_SIZE, CHUNK_OVERLAP);
        assert_eq!(chunks.len(), 2);
        assert_eq!(char_len(&chunks[0]), CHUNK_SIZE);
        assert_eq!(char_len(&chunks[1]), 300);
    }

    #[test]
    fn test_load_chunks_missing_file() {
        let loaded = load_chunks(Path::new("non/existent/faq.txt"));
        assert!(loaded.is_err());
    }

    #[test]
    fn test_load_chunks_reads_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "Refunds are processed within 5 business days.").unwrap();
        let chunks = load_chunks(temp_file.path()).unwrap();
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].contains("5 business days"));
    }
}
