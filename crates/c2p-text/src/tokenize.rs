//! Mixed Chinese/Latin tokenizer.
//!
//! Tokenization rules:
//! - A maximal Hanzi run is handed to the [`Segmenter`]; each resulting word
//!   becomes a `HanziWord` token (or a `LatinRun` if it holds characters
//!   outside the CJK Unified Ideographs block).
//! - Open and close punctuation characters are extracted as independent
//!   single-character `Punctuation` tokens.
//! - Everything else between Hanzi runs and punctuation (Latin letters,
//!   digits, spaces, apostrophes, ASCII commas) is kept together as a
//!   `LatinRun`.
//!
//! Example:
//!   "（ABC）你好，世界！" →
//!   [（][ABC][）][你好][，][世界][！]
//!
//! No characters are dropped or inserted: concatenating the token texts
//! reproduces the input.

use c2p_core::{is_hanzi_run_char, is_hanzi_word, PunctuationClasses, Token};

use crate::segment::Segmenter;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Tokenizer bound to one set of punctuation classes and one segmenter.
pub struct Tokenizer<'a> {
    punctuation: &'a PunctuationClasses,
    segmenter: &'a dyn Segmenter,
}

impl<'a> Tokenizer<'a> {
    pub fn new(punctuation: &'a PunctuationClasses, segmenter: &'a dyn Segmenter) -> Self {
        Self {
            punctuation,
            segmenter,
        }
    }

    /// Tokenize `text` (normally one paragraph) into a sequence of [`Token`]s.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut rest = text;

        while !rest.is_empty() {
            // Case 1: Hanzi run.
            let run_len = prefix_len(rest, is_hanzi_run_char);
            if run_len > 0 {
                self.push_words(&rest[..run_len], &mut tokens);
                rest = &rest[run_len..];
                continue;
            }

            // Case 2: non-Hanzi span up to the next run.
            let span_len = prefix_len(rest, |c| !is_hanzi_run_char(c));
            self.push_span(&rest[..span_len], &mut tokens);
            rest = &rest[span_len..];
        }

        tokens
    }

    fn push_words(&self, run: &str, tokens: &mut Vec<Token>) {
        for word in self.segmenter.segment(run) {
            if word.is_empty() {
                continue;
            }
            if is_hanzi_word(&word) {
                tokens.push(Token::hanzi(word));
            } else {
                tokens.push(Token::latin(word));
            }
        }
    }

    /// Split a non-Hanzi span on open/close punctuation.
    fn push_span(&self, span: &str, tokens: &mut Vec<Token>) {
        let mut buf_start = 0;
        for (i, ch) in span.char_indices() {
            if let Some(binding) = self.punctuation.binding(ch) {
                if i > buf_start {
                    tokens.push(Token::latin(&span[buf_start..i]));
                }
                tokens.push(Token::punct(ch, binding));
                buf_start = i + ch.len_utf8();
            }
        }
        if buf_start < span.len() {
            tokens.push(Token::latin(&span[buf_start..]));
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Byte length of the longest prefix of `s` whose chars all satisfy `pred`.
fn prefix_len(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|(_, c)| !pred(*c))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
