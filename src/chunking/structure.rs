//! Structure-Aware Splitter
//!
//! Two-phase chunking for documents with visible structure. A parsing pass
//! classifies each line as a heading (Markdown `#` prefixes, setext
//! `=`/`-` underlines, or a short-capitalized-line heuristic), a list
//! item, or paragraph text. An assembly pass then packs the typed
//! elements into chunks: headings always start a fresh chunk, and
//! oversized accumulations flush with an optional continuation marker.

use crate::chunking::Chunker;
use crate::error::EngineResult;

/// Heuristic heading detection: maximum line length in characters.
const HEADING_MAX_LEN: usize = 50;

/// Heuristic heading detection: minimum uppercase ratio among letters.
const HEADING_UPPERCASE_RATIO: f32 = 0.3;

/// Heading level assigned to heuristically detected (non-Markdown) headings.
const HEURISTIC_HEADING_LEVEL: usize = 3;

/// A typed document element produced by the parsing pass.
#[derive(Debug, Clone, PartialEq)]
enum Element {
    Heading { level: usize, text: String },
    ListItem(String),
    Paragraph(String),
}

/// Splits documents along their visible structure, packing elements into
/// chunks of at most `max_chunk_size` characters (headings always force a
/// fresh chunk regardless of fill).
pub struct StructureChunker {
    max_chunk_size: usize,
    preserve_structure: bool,
}

impl StructureChunker {
    pub fn new(max_chunk_size: usize, preserve_structure: bool) -> Self {
        Self {
            max_chunk_size: max_chunk_size.max(1),
            preserve_structure,
        }
    }

    // -----------------------------------------------------------------
    // Phase 1: structure parsing
    // -----------------------------------------------------------------

    fn parse_elements(&self, text: &str) -> Vec<Element> {
        let lines: Vec<&str> = text.lines().collect();
        let mut elements = Vec::new();
        let mut paragraph: Vec<&str> = Vec::new();

        let flush_paragraph = |paragraph: &mut Vec<&str>, elements: &mut Vec<Element>| {
            if !paragraph.is_empty() {
                elements.push(Element::Paragraph(paragraph.join(" ")));
                paragraph.clear();
            }
        };

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];
            let trimmed = line.trim();

            if trimmed.is_empty() {
                flush_paragraph(&mut paragraph, &mut elements);
                i += 1;
                continue;
            }

            if let Some((level, text)) = parse_atx_heading(trimmed) {
                flush_paragraph(&mut paragraph, &mut elements);
                elements.push(Element::Heading { level, text });
                i += 1;
                continue;
            }

            // Setext heading: text underlined by a run of `=` (level 1) or
            // `-` (level 2) on the following line.
            if let Some(level) = lines.get(i + 1).and_then(|next| underline_level(next)) {
                if !is_list_item(trimmed) {
                    flush_paragraph(&mut paragraph, &mut elements);
                    elements.push(Element::Heading {
                        level,
                        text: trimmed.to_string(),
                    });
                    i += 2;
                    continue;
                }
            }

            if is_list_item(trimmed) {
                flush_paragraph(&mut paragraph, &mut elements);
                elements.push(Element::ListItem(trimmed.to_string()));
                i += 1;
                continue;
            }

            if is_heuristic_heading(trimmed) {
                flush_paragraph(&mut paragraph, &mut elements);
                elements.push(Element::Heading {
                    level: HEURISTIC_HEADING_LEVEL,
                    text: trimmed.to_string(),
                });
                i += 1;
                continue;
            }

            paragraph.push(trimmed);
            i += 1;
        }
        flush_paragraph(&mut paragraph, &mut elements);

        elements
    }

    // -----------------------------------------------------------------
    // Phase 2: chunk assembly
    // -----------------------------------------------------------------

    fn assemble(&self, elements: Vec<Element>) -> Vec<String> {
        let mut chunks: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_heading: Option<String> = None;

        let flush = |current: &mut String, chunks: &mut Vec<String>| {
            let text = current.trim().to_string();
            if !text.is_empty() {
                chunks.push(text);
            }
            current.clear();
        };

        for element in elements {
            match element {
                Element::Heading { level, text } => {
                    flush(&mut current, &mut chunks);
                    current = if self.preserve_structure {
                        format!("{} {}", "#".repeat(level), text)
                    } else {
                        text.clone()
                    };
                    current_heading = Some(text);
                }
                Element::ListItem(text) | Element::Paragraph(text) => {
                    let added = char_len(&text) + if current.is_empty() { 0 } else { 2 };
                    if !current.is_empty()
                        && char_len(&current) + added > self.max_chunk_size
                    {
                        flush(&mut current, &mut chunks);
                        if self.preserve_structure {
                            if let Some(heading) = &current_heading {
                                current = format!("[Continued from: {heading}]");
                            }
                        }
                    }
                    if !current.is_empty() {
                        current.push_str("\n\n");
                    }
                    current.push_str(&text);
                }
            }
        }
        flush(&mut current, &mut chunks);

        chunks
    }
}

impl Chunker for StructureChunker {
    fn chunk(&self, text: &str) -> EngineResult<Vec<String>> {
        let elements = self.parse_elements(text);
        Ok(self.assemble(elements))
    }
}

// ---------------------------------------------------------------------------
// Line classification
// ---------------------------------------------------------------------------

/// Parse a Markdown ATX heading (`#` through `######` followed by a space).
fn parse_atx_heading(line: &str) -> Option<(usize, String)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    let text = rest.strip_prefix(' ')?.trim();
    if text.is_empty() {
        return None;
    }
    Some((level, text.to_string()))
}

/// Setext underline: a run of `=` (level 1) or `-` (level 2), at least two
/// characters long.
fn underline_level(line: &str) -> Option<usize> {
    let trimmed = line.trim();
    if trimmed.len() < 2 {
        return None;
    }
    if trimmed.chars().all(|c| c == '=') {
        Some(1)
    } else if trimmed.chars().all(|c| c == '-') {
        Some(2)
    } else {
        None
    }
}

/// Bullet (`-`, `*`, `•`), numeric (`1.` / `1)`), or lettered (`a.` / `a)`)
/// list markers.
fn is_list_item(line: &str) -> bool {
    if line.starts_with("- ") || line.starts_with("* ") || line.starts_with("• ") {
        return true;
    }

    let mut chars = line.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if first.is_ascii_digit() {
        // Consume the remaining digits of the number.
        let mut rest = line.trim_start_matches(|c: char| c.is_ascii_digit()).chars();
        matches!(rest.next(), Some('.') | Some(')'))
            && matches!(rest.next(), Some(' ') | None)
    } else if first.is_ascii_alphabetic() {
        matches!(chars.next(), Some('.') | Some(')'))
            && matches!(chars.next(), Some(' ') | None)
    } else {
        false
    }
}

/// Short line with no sentence terminator that is all-uppercase, or mostly
/// uppercase with a capitalized first letter.
fn is_heuristic_heading(line: &str) -> bool {
    if line.chars().count() >= HEADING_MAX_LEN {
        return false;
    }
    if line.ends_with(['.', '!', '?']) {
        return false;
    }

    let letters: Vec<char> = line.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return false;
    }

    let upper = letters.iter().filter(|c| c.is_uppercase()).count();
    if upper == letters.len() {
        return true;
    }

    let ratio = upper as f32 / letters.len() as f32;
    let first_capitalized = line.chars().next().is_some_and(char::is_uppercase);
    ratio > HEADING_UPPERCASE_RATIO && first_capitalized
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
