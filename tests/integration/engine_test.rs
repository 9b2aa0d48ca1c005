//! Engine Pipeline Integration Tests
//!
//! Full configure -> index -> search -> answer flows, ranking guarantees,
//! and the error/fallback contract of the public engine API.

use docrag::{ChunkingConfig, EngineError, RetrievalEngine, DEFAULT_TOP_K};

const DOCUMENT: &str = "\
Rust provides memory safety without garbage collection.

Python is widely used in data science and machine learning.

JavaScript runs in web browsers and server environments.

The Rust ownership system prevents data races at compile time.

Relational databases rely on indexing and normalization.";

fn indexed_engine() -> RetrievalEngine {
    let mut engine = RetrievalEngine::with_config(ChunkingConfig::Paragraph).unwrap();
    engine.index(DOCUMENT).unwrap();
    engine
}

// ============================================================================
// Index flow
// ============================================================================

#[test]
fn test_index_reports_paragraph_count() {
    let mut engine = RetrievalEngine::with_config(ChunkingConfig::Paragraph).unwrap();
    assert_eq!(engine.index(DOCUMENT).unwrap(), 5);
    assert!(engine.is_indexed());
    assert_eq!(engine.chunk_count(), 5);
}

#[test]
fn test_reindex_replaces_chunks_wholesale() {
    let mut engine = indexed_engine();
    engine.index("A single tiny document about sailing boats.").unwrap();
    assert_eq!(engine.chunk_count(), 1);
    assert!(engine.chunks()[0].contains("sailing"));
}

#[test]
fn test_rejected_configure_keeps_previous_configuration() {
    let mut engine = RetrievalEngine::new();
    engine.configure(ChunkingConfig::SentenceRegex).unwrap();

    let err = engine
        .configure(ChunkingConfig::FixedSize { size: 0, overlap: 0 })
        .unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
    assert!(matches!(engine.config(), ChunkingConfig::SentenceRegex));
}

#[test]
fn test_index_whitespace_document_is_degenerate_error() {
    let mut engine = RetrievalEngine::new();
    let err = engine.index("   \n\n   ").unwrap_err();
    assert!(matches!(err, EngineError::DegenerateInput(_)));
    assert!(!engine.is_indexed());
}

#[test]
fn test_failed_reindex_keeps_previous_index_serving() {
    let mut engine = indexed_engine();
    assert!(engine.index("the of and to").is_err());

    // Prior index still answers queries.
    assert_eq!(engine.chunk_count(), 5);
    let results = engine.search("Rust safety", DEFAULT_TOP_K);
    assert!(!results.is_empty());
}

// ============================================================================
// Search flow
// ============================================================================

#[test]
fn test_search_returns_most_relevant_chunks_first() {
    let engine = indexed_engine();
    let results = engine.search("Rust memory ownership", DEFAULT_TOP_K);

    assert!(!results.is_empty());
    assert!(results.len() <= DEFAULT_TOP_K);
    assert!(
        results[0].text.contains("Rust"),
        "top result should mention Rust: {:?}",
        results[0].text
    );
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_search_scores_stay_within_unit_interval() {
    let engine = indexed_engine();
    for result in engine.search("databases indexing safety science", 5) {
        assert!((0.0..=1.0).contains(&result.score), "score {}", result.score);
    }
}

#[test]
fn test_search_top_k_larger_than_corpus_returns_everything() {
    let engine = indexed_engine();
    assert_eq!(engine.search("anything at all", 50).len(), 5);
}

#[test]
fn test_search_unrelated_query_scores_zero() {
    let engine = indexed_engine();
    let results = engine.search("zanzibar quokka", DEFAULT_TOP_K);
    assert!(results.iter().all(|r| r.score == 0.0));
}

#[test]
fn test_tied_scores_rank_earlier_chunks_first() {
    let mut engine = RetrievalEngine::with_config(ChunkingConfig::Paragraph).unwrap();
    engine.index("cat dog\n\ncat bird\n\nfish whale").unwrap();

    let results = engine.search("cat", 3);
    assert_eq!(results[0].index, 0);
    assert_eq!(results[1].index, 1);
    assert!((results[0].score - results[1].score).abs() < 1e-6);
    assert!(results[1].score > results[2].score);
}

#[test]
fn test_search_before_index_is_empty_not_error() {
    let engine = RetrievalEngine::new();
    assert!(engine.search("anything", DEFAULT_TOP_K).is_empty());
}

// ============================================================================
// Answer flow
// ============================================================================

#[test]
fn test_answer_concatenates_in_ranked_order() {
    let mut engine = RetrievalEngine::with_config(ChunkingConfig::Paragraph).unwrap();
    engine.index("cat dog\n\nfish whale").unwrap();

    assert_eq!(
        engine.answer("whale", 2),
        "Based on the information: fish whale cat dog"
    );
}

#[test]
fn test_answer_without_index_is_fixed_fallback() {
    let engine = RetrievalEngine::new();
    assert_eq!(
        engine.answer("what is this about?", DEFAULT_TOP_K),
        "I don't have enough information to answer that question."
    );
}

#[test]
fn test_answer_is_purely_extractive() {
    let engine = indexed_engine();
    let answer = engine.answer("Rust ownership", 2);
    let body = answer.strip_prefix("Based on the information: ").unwrap();

    // Every retrieved fragment is verbatim document text.
    for fragment in engine.search("Rust ownership", 2) {
        assert!(DOCUMENT.contains(&fragment.text));
        assert!(body.contains(&fragment.text));
    }
}

// ============================================================================
// Strategy/engine combinations
// ============================================================================

#[test]
fn test_engine_works_with_every_strategy() {
    let configs = vec![
        ChunkingConfig::FixedSize { size: 10, overlap: 2 },
        ChunkingConfig::SentenceRegex,
        ChunkingConfig::SentenceTokenizer {
            tokenizer_available: docrag::sentence_tokenizer_available(),
        },
        ChunkingConfig::Paragraph,
        ChunkingConfig::SlidingWindow {
            window_size: 12,
            step_size: 6,
        },
        ChunkingConfig::Recursive {
            chunk_size: 120,
            chunk_overlap: 20,
        },
        ChunkingConfig::Semantic {
            buffer_size: 1,
            threshold: 0.4,
        },
        ChunkingConfig::Structure {
            max_chunk_size: 150,
            preserve_structure: true,
        },
    ];

    for config in configs {
        let mut engine = RetrievalEngine::with_config(config.clone()).unwrap();
        let count = engine.index(DOCUMENT).unwrap();
        assert!(count > 0, "no chunks with {config:?}");

        let results = engine.search("Rust memory safety", DEFAULT_TOP_K);
        assert!(!results.is_empty(), "no results with {config:?}");
        assert!(results.len() <= DEFAULT_TOP_K);

        let answer = engine.answer("Rust memory safety", DEFAULT_TOP_K);
        assert!(answer.starts_with("Based on the information: "));
    }
}

#[test]
fn test_same_document_same_config_is_reproducible() {
    let mut a = RetrievalEngine::with_config(ChunkingConfig::SentenceRegex).unwrap();
    let mut b = RetrievalEngine::with_config(ChunkingConfig::SentenceRegex).unwrap();
    a.index(DOCUMENT).unwrap();
    b.index(DOCUMENT).unwrap();

    assert_eq!(a.chunks(), b.chunks());

    let ra = a.search("data races", DEFAULT_TOP_K);
    let rb = b.search("data races", DEFAULT_TOP_K);
    let pairs_a: Vec<(usize, String)> = ra.iter().map(|r| (r.index, r.text.clone())).collect();
    let pairs_b: Vec<(usize, String)> = rb.iter().map(|r| (r.index, r.text.clone())).collect();
    assert_eq!(pairs_a, pairs_b);
}
