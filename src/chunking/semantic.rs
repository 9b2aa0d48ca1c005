//! Semantic Splitter
//!
//! Splits documents on topic boundaries: sentences are vectorized with the
//! TF-IDF vectorizer, and a chunk boundary opens wherever the cosine
//! similarity between consecutive sentence groups drops below the
//! configured threshold.
//!
//! When vectorization fails (the sentence vocabulary empties out after
//! stop-word removal) the splitter degrades to returning the raw sentence
//! list rather than erroring.

use crate::chunking::{split_sentences, Chunker};
use crate::error::EngineResult;
use crate::vectorizer::{cosine_similarity, TfidfVectorizer};

/// Splits documents where consecutive sentence-group similarity falls
/// below `threshold`. Groups are `buffer_size` sentences wide; the forward
/// group is truncated at the end of the document.
pub struct SemanticChunker {
    buffer_size: usize,
    threshold: f32,
}

impl SemanticChunker {
    pub fn new(buffer_size: usize, threshold: f32) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// Similarity between the sentence group starting at each offset and
    /// the group immediately after it.
    fn group_similarities(&self, vectors: &[Vec<f32>]) -> Vec<f32> {
        let n = vectors.len();
        let b = self.buffer_size;

        (0..n.saturating_sub(b))
            .map(|i| {
                let back = mean_vector(&vectors[i..i + b]);
                let forward_end = (i + 2 * b).min(n);
                let forward = mean_vector(&vectors[i + b..forward_end]);
                cosine_similarity(&back, &forward)
            })
            .collect()
    }
}

impl Chunker for SemanticChunker {
    fn chunk(&self, text: &str) -> EngineResult<Vec<String>> {
        let sentences = split_sentences(text);
        if sentences.len() <= 1 {
            return Ok(sentences);
        }

        let vectorizer = match TfidfVectorizer::fit(&sentences) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "sentence vectorization failed, returning raw sentence list"
                );
                return Ok(sentences);
            }
        };

        let sims = self.group_similarities(vectorizer.chunk_vectors());
        let b = self.buffer_size;

        // Walk forward; sentence s is decided by the similarity at offset
        // s - b. The first b sentences and the trailing group (which has no
        // forward comparison) never open a boundary.
        let mut chunks = Vec::new();
        let mut current = vec![sentences[0].clone()];
        for (s, sentence) in sentences.iter().enumerate().skip(1) {
            let boundary =
                s >= b && sims.get(s - b).is_some_and(|&sim| sim < self.threshold);
            if boundary {
                chunks.push(current.join(" "));
                current = vec![sentence.clone()];
            } else {
                current.push(sentence.clone());
            }
        }
        chunks.push(current.join(" "));

        Ok(chunks)
    }
}

/// Element-wise mean of a non-empty vector slice.
fn mean_vector(vectors: &[Vec<f32>]) -> Vec<f32> {
    let dim = vectors.first().map_or(0, Vec::len);
    let mut mean = vec![0.0f32; dim];
    for v in vectors {
        for (m, x) in mean.iter_mut().zip(v.iter()) {
            *m += x;
        }
    }
    let count = vectors.len().max(1) as f32;
    for m in &mut mean {
        *m /= count;
    }
    mean
}
