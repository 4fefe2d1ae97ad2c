//! Lexeme splitter
//!
//! Cuts raw text at runs of whitespace and at the clause punctuation
//! `. , ; : ! ?`. A punctuation mark sitting between two digits is part of a
//! number (`3.14`, `1,5`) and does not cut.
//!
//! Pieces are trimmed and empty pieces (two separators in a row) are dropped
//! without consuming a position, so positions are the 1-based ordinal of each
//! emitted lexeme.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+|[.,;:!?]").unwrap());

/// A candidate lexeme as it appears in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    /// Trimmed source text, not yet normalized
    pub text: String,
    /// 1-based ordinal among the emitted lexemes
    pub position: usize,
    /// Byte range of `text` within the source
    pub(crate) span: Range<usize>,
}

/// Split `text` into positioned candidate lexemes, in document order.
pub fn split(text: &str) -> Vec<Lexeme> {
    let mut lexemes = Vec::new();
    let mut start = 0;

    for separator in SEPARATOR.find_iter(text) {
        if is_number_mark(text, separator.range()) {
            continue;
        }
        push_piece(text, start..separator.start(), &mut lexemes);
        start = separator.end();
    }
    push_piece(text, start..text.len(), &mut lexemes);

    lexemes
}

fn is_number_mark(text: &str, range: Range<usize>) -> bool {
    if text[range.clone()].chars().any(char::is_whitespace) {
        return false;
    }
    let before = text[..range.start].chars().next_back();
    let after = text[range.end..].chars().next();
    matches!(
        (before, after),
        (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit()
    )
}

fn push_piece(text: &str, range: Range<usize>, lexemes: &mut Vec<Lexeme>) {
    let raw = &text[range.clone()];
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    let offset = range.start + (raw.len() - raw.trim_start().len());
    lexemes.push(Lexeme {
        text: trimmed.to_string(),
        position: lexemes.len() + 1,
        span: offset..offset + trimmed.len(),
    });
}
