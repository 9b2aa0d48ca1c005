//! Chunking Strategy Integration Tests
//!
//! Cross-strategy properties exercised through the public dispatch entry
//! point: word coverage, overlap sharing, non-empty chunks, determinism.

use docrag::{chunk, sentence_tokenizer_available, ChunkingConfig};

const SAMPLE: &str = "\
The quick brown fox jumps over the lazy dog. Pack my box with five dozen \
liquor jugs! How vexingly quick daft zebras jump?

SECOND SECTION

A new paragraph begins here with plain prose text. It continues with a \
second sentence about nothing in particular.

- first bullet item
- second bullet item

Closing paragraph with final words.";

fn all_strategies() -> Vec<ChunkingConfig> {
    vec![
        ChunkingConfig::FixedSize { size: 8, overlap: 2 },
        ChunkingConfig::SentenceRegex,
        ChunkingConfig::SentenceTokenizer {
            tokenizer_available: sentence_tokenizer_available(),
        },
        ChunkingConfig::Paragraph,
        ChunkingConfig::SlidingWindow {
            window_size: 10,
            step_size: 5,
        },
        ChunkingConfig::Recursive {
            chunk_size: 80,
            chunk_overlap: 10,
        },
        ChunkingConfig::Semantic {
            buffer_size: 1,
            threshold: 0.5,
        },
        ChunkingConfig::Structure {
            max_chunk_size: 120,
            preserve_structure: true,
        },
    ]
}

// ============================================================================
// Cross-strategy invariants
// ============================================================================

#[test]
fn test_no_strategy_yields_empty_chunks() {
    for config in all_strategies() {
        let chunks = chunk(SAMPLE, &config).unwrap();
        assert!(!chunks.is_empty(), "no chunks for {config:?}");
        for c in &chunks {
            assert_eq!(c.trim(), c, "untrimmed chunk from {config:?}: {c:?}");
            assert!(!c.is_empty(), "empty chunk from {config:?}");
        }
    }
}

#[test]
fn test_every_strategy_is_deterministic() {
    for config in all_strategies() {
        let first = chunk(SAMPLE, &config).unwrap();
        let second = chunk(SAMPLE, &config).unwrap();
        assert_eq!(first, second, "nondeterministic output for {config:?}");
    }
}

// ============================================================================
// Word coverage (fixed-size and sliding-window)
// ============================================================================

#[test]
fn test_fixed_size_round_trip_covers_all_words() {
    let config = ChunkingConfig::FixedSize { size: 7, overlap: 3 };
    let chunks = chunk(SAMPLE, &config).unwrap();

    // Step is 4 words: dropping each chunk's leading overlap (after the
    // first chunk) reconstructs the original word sequence.
    let mut words: Vec<&str> = Vec::new();
    for (i, c) in chunks.iter().enumerate() {
        let chunk_words: Vec<&str> = c.split_whitespace().collect();
        let skip = if i == 0 { 0 } else { 3 };
        words.extend(chunk_words.into_iter().skip(skip));
    }

    let original: Vec<&str> = SAMPLE.split_whitespace().collect();
    assert_eq!(words, original);
}

#[test]
fn test_sliding_window_round_trip_covers_all_words() {
    let config = ChunkingConfig::SlidingWindow {
        window_size: 6,
        step_size: 6,
    };
    let chunks = chunk(SAMPLE, &config).unwrap();

    let words: Vec<&str> = chunks
        .iter()
        .flat_map(|c| c.split_whitespace())
        .collect();
    let original: Vec<&str> = SAMPLE.split_whitespace().collect();
    assert_eq!(words, original);
}

#[test]
fn test_fixed_size_consecutive_chunks_share_exact_overlap() {
    let config = ChunkingConfig::FixedSize { size: 5, overlap: 2 };
    let chunks = chunk("w1 w2 w3 w4 w5 w6 w7 w8 w9 w10 w11", &config).unwrap();

    for pair in chunks.windows(2) {
        let left: Vec<&str> = pair[0].split_whitespace().collect();
        let right: Vec<&str> = pair[1].split_whitespace().collect();
        if left.len() == 5 {
            assert_eq!(&left[3..], &right[..2.min(right.len())]);
        }
    }
}

// ============================================================================
// Known-answer scenarios
// ============================================================================

#[test]
fn test_fixed_size_eight_word_example() {
    let config = ChunkingConfig::FixedSize { size: 3, overlap: 1 };
    let chunks = chunk("a b c d e f g h", &config).unwrap();
    assert_eq!(chunks, vec!["a b c", "c d e", "e f g", "g h"]);
}

#[test]
fn test_paragraph_three_paragraph_example() {
    let config = ChunkingConfig::Paragraph;
    let chunks = chunk("Para one.\n\nPara two.\n\n\nPara three.", &config).unwrap();
    assert_eq!(chunks, vec!["Para one.", "Para two.", "Para three."]);
}

#[test]
fn test_semantic_single_sentence_degenerate_case() {
    for threshold in [0.0, 0.3, 0.9] {
        let config = ChunkingConfig::Semantic {
            buffer_size: 1,
            threshold,
        };
        let chunks = chunk("Just one sentence in total.", &config).unwrap();
        assert_eq!(chunks, vec!["Just one sentence in total."]);
    }
}

// ============================================================================
// Strategy-specific flows through the dispatcher
// ============================================================================

#[test]
fn test_tokenizer_strategy_degrades_to_regex_without_capability() {
    let tokenized = chunk(
        SAMPLE,
        &ChunkingConfig::SentenceTokenizer {
            tokenizer_available: false,
        },
    )
    .unwrap();
    let regex = chunk(SAMPLE, &ChunkingConfig::SentenceRegex).unwrap();
    assert_eq!(tokenized, regex);
}

#[test]
fn test_recursive_respects_character_budget() {
    let config = ChunkingConfig::Recursive {
        chunk_size: 60,
        chunk_overlap: 0,
    };
    for c in chunk(SAMPLE, &config).unwrap() {
        assert!(c.chars().count() <= 60, "over budget: {c:?}");
    }
}

#[test]
fn test_structure_detects_uppercase_section_heading() {
    let config = ChunkingConfig::Structure {
        max_chunk_size: 500,
        preserve_structure: true,
    };
    let chunks = chunk(SAMPLE, &config).unwrap();
    // The all-caps line is heuristically a heading and starts its own chunk.
    assert!(
        chunks.iter().any(|c| c.starts_with("### SECOND SECTION")),
        "heading chunk missing: {chunks:?}"
    );
}

#[test]
fn test_invalid_configs_are_rejected_at_dispatch() {
    let invalid = vec![
        ChunkingConfig::FixedSize { size: 0, overlap: 0 },
        ChunkingConfig::SlidingWindow {
            window_size: 4,
            step_size: 9,
        },
        ChunkingConfig::SlidingWindow {
            window_size: 0,
            step_size: 1,
        },
        ChunkingConfig::Recursive {
            chunk_size: 10,
            chunk_overlap: 10,
        },
        ChunkingConfig::Semantic {
            buffer_size: 0,
            threshold: 0.5,
        },
        ChunkingConfig::Structure {
            max_chunk_size: 0,
            preserve_structure: false,
        },
    ];
    for config in invalid {
        assert!(chunk(SAMPLE, &config).is_err(), "accepted {config:?}");
    }
}
