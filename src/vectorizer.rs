//! TF-IDF Vectorizer
//!
//! Local, offline text vectorization using TF-IDF (Term Frequency —
//! Inverse Document Frequency). The vector space is fitted once over a
//! chunk set; after `fit` the vocabulary and IDF weights are frozen, and
//! queries are projected into that exact space with `transform`.
//!
//! ## Design Decisions
//!
//! * **No external ML dependency** — pure Rust, no model downloads.
//! * **Immutable fitted state** — `fit` returns a value; re-indexing a new
//!   document means fitting a new vectorizer, never mutating the old one.
//! * **English stop-word removal** — tokens from a fixed stop list never
//!   enter the vocabulary and carry zero weight in queries.

use std::collections::{HashMap, HashSet};

use crate::error::{EngineError, EngineResult};

/// Maximum vocabulary size (number of unique terms tracked).
const MAX_VOCAB_SIZE: usize = 8192;

/// Minimum token length; single characters are discarded.
const MIN_TOKEN_LEN: usize = 2;

/// Standard English stop words, removed before vocabulary construction.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "been", "but", "by", "can",
    "could", "did", "do", "does", "for", "from", "had", "has", "have",
    "having", "he", "her", "here", "him", "his", "how", "if", "in", "into",
    "is", "it", "its", "may", "might", "must", "no", "not", "of", "on",
    "or", "our", "shall", "she", "should", "so", "some", "such", "than",
    "that", "the", "their", "them", "then", "there", "these", "they",
    "this", "those", "to", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "whose", "why", "will", "with",
    "would", "you", "your",
];

/// Internal vocabulary learned from a chunk set.
#[derive(Debug, Clone)]
struct Vocabulary {
    /// Map from term → column index in the TF-IDF vector.
    term_to_idx: HashMap<String, usize>,
    /// Inverse document frequency for each term (same order as `term_to_idx` values).
    idf: Vec<f32>,
}

/// A fitted TF-IDF vector space over one chunk set.
///
/// Holds the frozen vocabulary, IDF weights, and one L2-normalized vector
/// per chunk. Construct with [`TfidfVectorizer::fit`].
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocab: Vocabulary,
    chunk_vectors: Vec<Vec<f32>>,
}

impl TfidfVectorizer {
    /// Fit a vector space over `chunks`.
    ///
    /// Tokenizes each chunk (case-folded, stop words removed), builds the
    /// vocabulary and IDF weights, and computes one normalized vector per
    /// chunk. Fails with [`EngineError::DegenerateInput`] when `chunks` is
    /// empty or when no terms survive stop-word removal.
    pub fn fit(chunks: &[String]) -> EngineResult<Self> {
        if chunks.is_empty() {
            return Err(EngineError::degenerate("cannot fit on an empty chunk list"));
        }

        let vocab = build_vocab(chunks);
        if vocab.idf.is_empty() {
            return Err(EngineError::degenerate(
                "no vocabulary terms survive stop-word removal",
            ));
        }

        let chunk_vectors = chunks.iter().map(|c| tfidf_vector(c, &vocab)).collect();

        tracing::debug!(
            terms = vocab.idf.len(),
            chunks = chunks.len(),
            "fitted TF-IDF vector space"
        );

        Ok(Self {
            vocab,
            chunk_vectors,
        })
    }

    /// Project a query string into the fitted space.
    ///
    /// Terms absent from the fitted vocabulary are ignored (zero weight).
    /// The fitted state is never altered by a transform.
    pub fn transform(&self, query: &str) -> Vec<f32> {
        tfidf_vector(query, &self.vocab)
    }

    /// The fitted per-chunk vectors, in chunk order.
    pub fn chunk_vectors(&self) -> &[Vec<f32>] {
        &self.chunk_vectors
    }

    /// Dimensionality of the fitted space (vocabulary size).
    pub fn dimension(&self) -> usize {
        self.vocab.idf.len()
    }
}

// ---------------------------------------------------------------------------
// Cosine similarity
// ---------------------------------------------------------------------------

/// Compute the cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero magnitude or lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut mag_a = 0.0f32;
    let mut mag_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }

    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

// ---------------------------------------------------------------------------
// Tokenisation
// ---------------------------------------------------------------------------

/// Simple tokeniser: lowercase, split on non-alphanumeric, drop short
/// tokens and English stop words.
fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= MIN_TOKEN_LEN && !STOP_WORDS.contains(w))
        .map(|w| w.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Vocabulary building
// ---------------------------------------------------------------------------

/// Build a `Vocabulary` from a chunk set.
fn build_vocab(chunks: &[String]) -> Vocabulary {
    let num_docs = chunks.len().max(1);

    // Count document frequency for each term.
    let mut doc_freq: HashMap<String, usize> = HashMap::new();

    for chunk in chunks {
        let tokens = tokenize(chunk);
        // De-duplicate terms within this chunk.
        let unique: HashSet<&str> = tokens.iter().map(|s| s.as_str()).collect();
        for term in unique {
            *doc_freq.entry(term.to_string()).or_insert(0) += 1;
        }
    }

    // Deterministic ordering: frequency descending, then term ascending.
    let mut entries: Vec<(String, usize)> = doc_freq.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(MAX_VOCAB_SIZE);

    let mut term_to_idx = HashMap::with_capacity(entries.len());
    let mut idf = Vec::with_capacity(entries.len());

    for (idx, (term, freq)) in entries.into_iter().enumerate() {
        term_to_idx.insert(term, idx);
        // Standard IDF formula: log(N / df) + 1 (the +1 prevents zero IDF).
        let idf_val = ((num_docs as f32) / (freq as f32)).ln() + 1.0;
        idf.push(idf_val);
    }

    Vocabulary { term_to_idx, idf }
}

// ---------------------------------------------------------------------------
// TF-IDF vector computation
// ---------------------------------------------------------------------------

/// Compute a normalised TF-IDF vector for `text` using the given vocabulary.
fn tfidf_vector(text: &str, vocab: &Vocabulary) -> Vec<f32> {
    let dim = vocab.idf.len();
    if dim == 0 {
        return Vec::new();
    }

    let tokens = tokenize(text);
    let total_tokens = tokens.len().max(1) as f32;

    // Term frequency (normalised by token count)
    let mut tf = vec![0.0f32; dim];
    for tok in &tokens {
        if let Some(&idx) = vocab.term_to_idx.get(tok.as_str()) {
            tf[idx] += 1.0 / total_tokens;
        }
    }

    // Multiply by IDF
    for (i, idf_val) in vocab.idf.iter().enumerate() {
        tf[i] *= idf_val;
    }

    // L2 normalise
    let mag: f32 = tf.iter().map(|v| v * v).sum::<f32>().sqrt();
    if mag > 0.0 {
        for v in &mut tf {
            *v /= mag;
        }
    }

    tf
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
