//! Similarity Ranker
//!
//! Ranks chunks by cosine similarity against a query vector.
//!
//! Results with equal scores are ordered by ascending chunk index (earlier
//! in the document first) so that ranking is deterministic across runs —
//! naive sort stability is not relied upon.

use crate::vectorizer::cosine_similarity;

/// Rank `chunk_vectors` against `query` and return the top `k` as
/// `(chunk_index, score)` pairs.
///
/// Scores are sorted descending; ties break by ascending chunk index. When
/// `k` exceeds the number of chunks, all chunks are returned ranked. An
/// empty vector set yields an empty result, never an error.
pub fn top_k(query: &[f32], chunk_vectors: &[Vec<f32>], k: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = chunk_vectors
        .iter()
        .enumerate()
        .map(|(idx, vec)| (idx, cosine_similarity(query, vec)))
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    scored.truncate(k);
    scored
}
