//! Recursive Splitter
//!
//! Splits text with a priority-ordered separator list: paragraph breaks,
//! line breaks, sentence punctuation, clause punctuation, single spaces,
//! and finally raw character slicing. Pieces are greedily packed into a
//! character budget; a buffer that still exceeds the budget is re-split
//! with the remaining, lower-priority separators.

use crate::chunking::Chunker;
use crate::error::EngineResult;

/// Separators in priority order. Character slicing is the unconditional
/// fallback once the list is exhausted.
const SEPARATORS: &[&str] = &["\n\n", "\n", ". ", "! ", "? ", "; ", ", ", " "];

/// Splits documents into character-budgeted chunks along natural
/// boundaries, carrying `chunk_overlap` trailing characters between
/// consecutive chunks for continuity.
pub struct RecursiveChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveChunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    /// Split `text` using the given separator tail, appending finished
    /// chunks to `out`.
    fn split(&self, text: &str, separators: &[&str], out: &mut Vec<String>) {
        let Some((sep, remaining)) = separators.split_first() else {
            self.slice_chars(text, out);
            return;
        };

        let pieces: Vec<&str> = text.split(sep).collect();
        let last = pieces.len() - 1;

        let mut buffer = String::new();
        for (i, piece) in pieces.into_iter().enumerate() {
            // Re-append the separator so chunks remain reconstructible,
            // except after the final piece.
            let piece = if i < last {
                format!("{piece}{sep}")
            } else {
                piece.to_string()
            };

            if !buffer.is_empty()
                && char_len(&buffer) + char_len(&piece) > self.chunk_size
            {
                self.emit(&buffer, remaining, out);
                buffer = self.overlap_tail(&buffer);
            }
            buffer.push_str(&piece);
        }

        if !buffer.is_empty() {
            self.emit(&buffer, remaining, out);
        }
    }

    /// Emit a finished buffer, re-splitting it with the remaining
    /// separators when it still exceeds the budget.
    fn emit(&self, buffer: &str, remaining: &[&str], out: &mut Vec<String>) {
        if char_len(buffer) > self.chunk_size {
            self.split(buffer, remaining, out);
        } else {
            out.push(buffer.to_string());
        }
    }

    /// Unconditional fallback: raw character slices advancing by
    /// `chunk_size - chunk_overlap`.
    fn slice_chars(&self, text: &str, out: &mut Vec<String>) {
        let chars: Vec<char> = text.chars().collect();
        let step = self.chunk_size - self.chunk_overlap;

        let mut start = 0;
        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            out.push(chars[start..end].iter().collect());
            start += step;
        }
    }

    /// Trailing `chunk_overlap` characters of a finished buffer, used to
    /// seed the next one.
    fn overlap_tail(&self, buffer: &str) -> String {
        if self.chunk_overlap == 0 {
            return String::new();
        }
        let chars: Vec<char> = buffer.chars().collect();
        let start = chars.len().saturating_sub(self.chunk_overlap);
        chars[start..].iter().collect()
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

impl Chunker for RecursiveChunker {
    fn chunk(&self, text: &str) -> EngineResult<Vec<String>> {
        let mut raw = Vec::new();
        self.split(text, SEPARATORS, &mut raw);

        Ok(raw
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect())
    }
}
