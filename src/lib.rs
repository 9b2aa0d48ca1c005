//! DocRag Core
//!
//! Classical information-retrieval core for single-document question
//! answering: segment a document into chunks, fit a TF-IDF vector space
//! over them, and serve queries by cosine-similarity ranking with purely
//! extractive answers. No neural embeddings, no generation, no I/O — the
//! crate operates on in-memory strings and leaves upload/UI concerns to
//! its callers.
//!
//! ## Module Organization
//!
//! - `error` - Unified error types (`EngineError`, `EngineResult`)
//! - `chunking` - The `Chunker` trait, `ChunkingConfig`, and the eight
//!   segmentation strategies
//! - `vectorizer` - TF-IDF vector space (`TfidfVectorizer`, `cosine_similarity`)
//! - `ranker` - Top-k cosine ranking with deterministic tie-breaks
//! - `engine` - `RetrievalEngine` orchestrating configure -> index -> query
//!
//! ## Usage
//!
//! ```rust
//! use docrag::{ChunkingConfig, RetrievalEngine, DEFAULT_TOP_K};
//!
//! let mut engine = RetrievalEngine::with_config(ChunkingConfig::Paragraph)?;
//! engine.index("Rust is fast.\n\nPython is popular.")?;
//!
//! let results = engine.search("fast language", DEFAULT_TOP_K);
//! assert!(!results.is_empty());
//! let answer = engine.answer("fast language", DEFAULT_TOP_K);
//! assert!(answer.starts_with("Based on the information:"));
//! # Ok::<(), docrag::EngineError>(())
//! ```

pub mod chunking;
pub mod engine;
pub mod error;
pub mod ranker;
pub mod vectorizer;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{EngineError, EngineResult};

// ── Chunking ───────────────────────────────────────────────────────────
pub use chunking::{chunk, sentence_tokenizer_available, Chunker, ChunkingConfig};

// ── Vector Space ───────────────────────────────────────────────────────
pub use vectorizer::{cosine_similarity, TfidfVectorizer};

// ── Engine ─────────────────────────────────────────────────────────────
pub use engine::{RetrievalEngine, ScoredChunk, DEFAULT_TOP_K};
