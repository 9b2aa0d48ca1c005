//! Document Chunking
//!
//! Defines the `Chunker` trait and the eight built-in segmentation
//! strategies, selected through the [`ChunkingConfig`] enum:
//!
//! - `FixedSize`: word windows of `size` words advancing by `size - overlap`
//! - `SentenceRegex`: sentence boundaries at whitespace following `.` `!` `?`
//! - `SentenceTokenizer`: UAX #29 sentence segmentation, falling back to
//!   the regex splitter when the capability is unavailable
//! - `Paragraph`: blank-line boundaries
//! - `SlidingWindow`: word windows with an independent step size
//! - `Recursive`: priority-ordered separator splitting (see `recursive`)
//! - `Semantic`: similarity-drop boundaries (see `semantic`)
//! - `Structure`: heading/list/paragraph aware assembly (see `structure`)
//!
//! Every strategy produces an ordered sequence of non-empty, trimmed
//! chunk strings; configuration is validated before use.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

pub mod recursive;
pub mod semantic;
pub mod structure;

pub use recursive::RecursiveChunker;
pub use semantic::SemanticChunker;
pub use structure::StructureChunker;

/// Trait for document chunking strategies.
pub trait Chunker: Send + Sync {
    /// Split a document into an ordered sequence of chunk strings.
    fn chunk(&self, text: &str) -> EngineResult<Vec<String>>;
}

/// Whether the locale-aware sentence tokenizer was compiled in.
///
/// Probed once by the caller and passed down as the `tokenizer_available`
/// flag of [`ChunkingConfig::SentenceTokenizer`]; the strategy silently
/// degrades to the regex splitter when the flag is off.
pub fn sentence_tokenizer_available() -> bool {
    cfg!(feature = "unicode-sentences")
}

// ---------------------------------------------------------------------------
// ChunkingConfig
// ---------------------------------------------------------------------------

/// Configuration enum for selecting and parameterizing a chunking strategy.
///
/// Exactly one strategy is active per index build. Numeric parameters are
/// validated by [`ChunkingConfig::validate`]; the only silent correction is
/// the fixed-size overlap clamp documented on the variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "strategy")]
pub enum ChunkingConfig {
    /// Word windows of `size` words advancing by `size - overlap` words.
    /// An `overlap >= size` is clamped to `size - 1`.
    FixedSize {
        /// Words per chunk (must be > 0).
        size: usize,
        /// Words shared between consecutive chunks.
        overlap: usize,
    },
    /// Sentence boundaries at whitespace following `.`, `!` or `?`.
    SentenceRegex,
    /// Locale-aware sentence segmentation when available; regex fallback
    /// otherwise.
    SentenceTokenizer {
        /// Capability flag supplied by the caller (see
        /// [`sentence_tokenizer_available`]).
        #[serde(default = "sentence_tokenizer_available")]
        tokenizer_available: bool,
    },
    /// One chunk per blank-line-separated paragraph.
    Paragraph,
    /// Word windows with an independent step size.
    SlidingWindow {
        /// Words per window (must be > 0).
        window_size: usize,
        /// Word offset between window starts (must be > 0 and <= window_size).
        step_size: usize,
    },
    /// Priority-ordered separator splitting with character budgets.
    Recursive {
        /// Maximum characters per chunk (must be > 0).
        chunk_size: usize,
        /// Characters carried over between chunks (must be < chunk_size).
        chunk_overlap: usize,
    },
    /// Boundaries where consecutive sentence-group similarity drops.
    Semantic {
        /// Sentences per comparison group (must be >= 1).
        buffer_size: usize,
        /// Similarity cutoff in [0, 1]; lower similarity opens a boundary.
        threshold: f32,
    },
    /// Heading/list/paragraph aware assembly up to a character budget.
    Structure {
        /// Maximum characters per chunk (must be > 0).
        max_chunk_size: usize,
        /// Re-prefix headings and mark continuation chunks.
        preserve_structure: bool,
    },
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        ChunkingConfig::FixedSize {
            size: 15,
            overlap: 0,
        }
    }
}

impl ChunkingConfig {
    /// Validate strategy parameters.
    ///
    /// Rejects non-positive sizes and invalid step/overlap relationships
    /// with [`EngineError::Config`]. The fixed-size overlap clamp is the
    /// one documented exception and is not an error.
    pub fn validate(&self) -> EngineResult<()> {
        match self {
            ChunkingConfig::FixedSize { size, .. } => {
                if *size == 0 {
                    return Err(EngineError::config("chunk size must be > 0"));
                }
            }
            ChunkingConfig::SentenceRegex
            | ChunkingConfig::SentenceTokenizer { .. }
            | ChunkingConfig::Paragraph => {}
            ChunkingConfig::SlidingWindow {
                window_size,
                step_size,
            } => {
                if *window_size == 0 {
                    return Err(EngineError::config("window size must be > 0"));
                }
                if *step_size == 0 {
                    return Err(EngineError::config("step size must be > 0"));
                }
                if step_size > window_size {
                    return Err(EngineError::config(
                        "step size must not exceed window size",
                    ));
                }
            }
            ChunkingConfig::Recursive {
                chunk_size,
                chunk_overlap,
            } => {
                if *chunk_size == 0 {
                    return Err(EngineError::config("chunk size must be > 0"));
                }
                if chunk_overlap >= chunk_size {
                    return Err(EngineError::config(
                        "chunk overlap must be smaller than chunk size",
                    ));
                }
            }
            ChunkingConfig::Semantic {
                buffer_size,
                threshold,
            } => {
                if *buffer_size == 0 {
                    return Err(EngineError::config("buffer size must be >= 1"));
                }
                if !(0.0..=1.0).contains(threshold) {
                    return Err(EngineError::config(
                        "similarity threshold must be within [0, 1]",
                    ));
                }
            }
            ChunkingConfig::Structure { max_chunk_size, .. } => {
                if *max_chunk_size == 0 {
                    return Err(EngineError::config("max chunk size must be > 0"));
                }
            }
        }
        Ok(())
    }

    /// Build a boxed Chunker from this configuration.
    pub fn build(&self) -> Box<dyn Chunker> {
        match self {
            ChunkingConfig::FixedSize { size, overlap } => {
                Box::new(FixedSizeChunker::new(*size, *overlap))
            }
            ChunkingConfig::SentenceRegex => Box::new(SentenceRegexChunker),
            ChunkingConfig::SentenceTokenizer {
                tokenizer_available,
            } => Box::new(SentenceTokenizerChunker::new(*tokenizer_available)),
            ChunkingConfig::Paragraph => Box::new(ParagraphChunker::new()),
            ChunkingConfig::SlidingWindow {
                window_size,
                step_size,
            } => Box::new(SlidingWindowChunker::new(*window_size, *step_size)),
            ChunkingConfig::Recursive {
                chunk_size,
                chunk_overlap,
            } => Box::new(RecursiveChunker::new(*chunk_size, *chunk_overlap)),
            ChunkingConfig::Semantic {
                buffer_size,
                threshold,
            } => Box::new(SemanticChunker::new(*buffer_size, *threshold)),
            ChunkingConfig::Structure {
                max_chunk_size,
                preserve_structure,
            } => Box::new(StructureChunker::new(*max_chunk_size, *preserve_structure)),
        }
    }
}

/// Chunk `document` with the given configuration.
///
/// Single dispatch entry point: validates the configuration, builds the
/// strategy, and runs it.
pub fn chunk(document: &str, config: &ChunkingConfig) -> EngineResult<Vec<String>> {
    config.validate()?;
    config.build().chunk(document)
}

// ---------------------------------------------------------------------------
// FixedSizeChunker
// ---------------------------------------------------------------------------

/// Splits documents into fixed-size word windows with overlap.
///
/// Windows start at every multiple of `size - overlap`; the final window
/// may be shorter than `size`.
pub struct FixedSizeChunker {
    size: usize,
    overlap: usize,
}

impl FixedSizeChunker {
    pub fn new(size: usize, overlap: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            overlap: overlap.min(size - 1),
        }
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, text: &str) -> EngineResult<Vec<String>> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let step = self.size - self.overlap;

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < words.len() {
            let end = (start + self.size).min(words.len());
            chunks.push(words[start..end].join(" "));
            start += step;
        }

        Ok(chunks)
    }
}

// ---------------------------------------------------------------------------
// Sentence splitting
// ---------------------------------------------------------------------------

/// Split text into sentences at whitespace following `.`, `!` or `?`.
///
/// Punctuation stays with the preceding sentence; trailing text without a
/// terminator forms a final sentence. Results are trimmed and non-empty.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut start = 0;
    let mut i = 0;

    while i < len {
        let b = bytes[i];
        if (b == b'.' || b == b'!' || b == b'?')
            && (i + 1 >= len || bytes[i + 1].is_ascii_whitespace())
        {
            let sentence = text[start..i + 1].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            i += 1;
            while i < len && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            start = i;
            continue;
        }
        i += 1;
    }

    if start < len {
        let sentence = text[start..].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
    }

    sentences
}

/// Splits documents at sentence boundaries using the regex-equivalent
/// byte scanner.
pub struct SentenceRegexChunker;

impl Chunker for SentenceRegexChunker {
    fn chunk(&self, text: &str) -> EngineResult<Vec<String>> {
        Ok(split_sentences(text))
    }
}

/// Splits documents into sentences with the UAX #29 segmenter when the
/// capability flag is set, degrading to the regex splitter otherwise.
///
/// The degrade is silent (a capability gap, not an error).
pub struct SentenceTokenizerChunker {
    tokenizer_available: bool,
}

impl SentenceTokenizerChunker {
    pub fn new(tokenizer_available: bool) -> Self {
        Self {
            tokenizer_available,
        }
    }

    #[cfg(feature = "unicode-sentences")]
    fn tokenize_sentences(text: &str) -> Vec<String> {
        use unicode_segmentation::UnicodeSegmentation;
        text.unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect()
    }
}

impl Chunker for SentenceTokenizerChunker {
    fn chunk(&self, text: &str) -> EngineResult<Vec<String>> {
        #[cfg(feature = "unicode-sentences")]
        {
            if self.tokenizer_available {
                return Ok(Self::tokenize_sentences(text));
            }
        }

        #[cfg(not(feature = "unicode-sentences"))]
        {
            if self.tokenizer_available {
                tracing::debug!("sentence tokenizer not compiled in, using regex splitter");
            }
        }

        Ok(split_sentences(text))
    }
}

// ---------------------------------------------------------------------------
// ParagraphChunker
// ---------------------------------------------------------------------------

/// Splits documents on one-or-more blank lines.
pub struct ParagraphChunker {
    boundary: Regex,
}

impl ParagraphChunker {
    pub fn new() -> Self {
        Self {
            boundary: Regex::new(r"\n\s*\n").expect("static paragraph pattern compiles"),
        }
    }
}

impl Default for ParagraphChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl Chunker for ParagraphChunker {
    fn chunk(&self, text: &str) -> EngineResult<Vec<String>> {
        Ok(self
            .boundary
            .split(text.trim())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| p.to_string())
            .collect())
    }
}

// ---------------------------------------------------------------------------
// SlidingWindowChunker
// ---------------------------------------------------------------------------

/// Word windows starting at every multiple of `step_size`.
///
/// The window containing the final word is emitted, then iteration halts;
/// no window starts past the end of the document.
pub struct SlidingWindowChunker {
    window_size: usize,
    step_size: usize,
}

impl SlidingWindowChunker {
    pub fn new(window_size: usize, step_size: usize) -> Self {
        Self {
            window_size: window_size.max(1),
            step_size: step_size.max(1),
        }
    }
}

impl Chunker for SlidingWindowChunker {
    fn chunk(&self, text: &str) -> EngineResult<Vec<String>> {
        let words: Vec<&str> = text.split_whitespace().collect();

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < words.len() {
            let end = (start + self.window_size).min(words.len());
            chunks.push(words[start..end].join(" "));
            if start + self.window_size >= words.len() {
                break;
            }
            start += self.step_size;
        }

        Ok(chunks)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
