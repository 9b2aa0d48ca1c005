//! Retrieval Engine
//!
//! Orchestrates the full retrieval flow over a single document:
//! chunking -> TF-IDF fit -> query-time ranking -> extractive answers.
//!
//! The engine owns the chunking configuration and the fitted index.
//! Indexing a new document replaces the prior index wholesale; a failed
//! `index` call leaves the previously fitted index untouched, so callers
//! can retry with a different document or configuration.

use serde::{Deserialize, Serialize};

use crate::chunking::{self, ChunkingConfig};
use crate::error::{EngineError, EngineResult};
use crate::ranker;
use crate::vectorizer::TfidfVectorizer;

/// Default number of results returned by `search`/`answer`.
pub const DEFAULT_TOP_K: usize = 3;

/// Lead-in phrase for synthesized answers.
const ANSWER_PREFIX: &str = "Based on the information: ";

/// Fixed response when retrieval produces no results.
const FALLBACK_ANSWER: &str = "I don't have enough information to answer that question.";

/// A retrieved chunk with its relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// Chunk text content.
    pub text: String,
    /// Cosine similarity against the query, in [0, 1].
    pub score: f32,
    /// Position of the chunk in the original chunking pass.
    pub index: usize,
}

/// A fitted index over one document: the chunk texts plus their frozen
/// TF-IDF vector space.
struct DocumentIndex {
    chunks: Vec<String>,
    vectorizer: TfidfVectorizer,
}

/// Single-document retrieval engine.
///
/// All operations are synchronous, in-memory computations. `configure`
/// and `index` take `&mut self`; `search` and `answer` take `&self`, so
/// the borrow checker enforces the single-writer / multi-reader
/// discipline for concurrent use.
pub struct RetrievalEngine {
    config: ChunkingConfig,
    index: Option<DocumentIndex>,
}

impl RetrievalEngine {
    /// Create an engine with the default chunking configuration and no
    /// indexed document.
    pub fn new() -> Self {
        Self {
            config: ChunkingConfig::default(),
            index: None,
        }
    }

    /// Create an engine with a validated configuration.
    pub fn with_config(config: ChunkingConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            index: None,
        })
    }

    /// Validate and store a chunking configuration.
    ///
    /// Does not rebuild the index; the previously fitted index (if any)
    /// keeps serving queries until the next [`index`](Self::index) call.
    pub fn configure(&mut self, config: ChunkingConfig) -> EngineResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Chunk and index a document, replacing any prior index.
    ///
    /// Returns the number of chunks produced. Fails with
    /// [`EngineError::Config`] for an invalid configuration and
    /// [`EngineError::DegenerateInput`] when chunking yields nothing or
    /// the vocabulary empties out; on failure the prior index is retained.
    pub fn index(&mut self, document: &str) -> EngineResult<usize> {
        let chunks = chunking::chunk(document, &self.config)?;
        if chunks.is_empty() {
            return Err(EngineError::degenerate(
                "chunking produced no chunks from the document",
            ));
        }

        let vectorizer = TfidfVectorizer::fit(&chunks)?;
        let count = chunks.len();

        tracing::info!(
            chunks = count,
            terms = vectorizer.dimension(),
            "indexed document"
        );

        self.index = Some(DocumentIndex { chunks, vectorizer });
        Ok(count)
    }

    /// Rank the indexed chunks against `query`, returning at most `top_k`
    /// results ordered by descending similarity (ties by document order).
    ///
    /// Returns an empty list when no document has been indexed — a normal
    /// outcome, not an error.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<ScoredChunk> {
        let Some(index) = &self.index else {
            return Vec::new();
        };

        let query_vector = index.vectorizer.transform(query);
        let ranked = ranker::top_k(&query_vector, index.vectorizer.chunk_vectors(), top_k);

        tracing::debug!(results = ranked.len(), top_k, "search completed");

        ranked
            .into_iter()
            .map(|(i, score)| ScoredChunk {
                text: index.chunks[i].clone(),
                score,
                index: i,
            })
            .collect()
    }

    /// Produce an extractive answer: the retrieved chunk texts in ranked
    /// order, space-joined behind a fixed lead-in. Returns the fixed
    /// fallback string when retrieval yields nothing.
    pub fn answer(&self, query: &str, top_k: usize) -> String {
        let results = self.search(query, top_k);
        if results.is_empty() {
            return FALLBACK_ANSWER.to_string();
        }

        let joined = results
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        format!("{ANSWER_PREFIX}{joined}")
    }

    /// The chunks of the currently indexed document, in document order.
    pub fn chunks(&self) -> &[String] {
        self.index.as_ref().map_or(&[], |i| i.chunks.as_slice())
    }

    /// Number of chunks in the current index.
    pub fn chunk_count(&self) -> usize {
        self.chunks().len()
    }

    /// Whether a document has been indexed.
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    /// The active chunking configuration.
    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }
}

impl Default for RetrievalEngine {
    fn default() -> Self {
        Self::new()
    }
}
