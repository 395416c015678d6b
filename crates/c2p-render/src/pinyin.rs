//! Romanization-only rendering.
//!
//! Punctuation attachment:
//! - open punctuation is held back and prefixed to the next unit;
//! - close punctuation is appended to the previous unit;
//! - a word separator follows each unit unless the unit ends the paragraph
//!   or the next token is punctuation.

use c2p_core::markup::{self, PARAGRAPH_SEPARATOR, WORD_SEPARATOR};
use c2p_core::{classify, Binding, FormatConfig, Token, TokenKind};
use c2p_text::Romanizer;

/// Tone-colored syllables of `word`, one per recognized character, with no
/// separator between them.
pub(crate) fn colorize_word(config: &FormatConfig, romanizer: &dyn Romanizer, word: &str) -> String {
    romanizer
        .romanize_word(word, config.romanization)
        .iter()
        .map(|syl| markup::syllable(config.tone_color(classify(syl)), syl))
        .collect()
}

pub struct PinyinRenderer<'a> {
    config: &'a FormatConfig,
    romanizer: &'a dyn Romanizer,
}

impl<'a> PinyinRenderer<'a> {
    pub fn new(config: &'a FormatConfig, romanizer: &'a dyn Romanizer) -> Self {
        Self { config, romanizer }
    }

    /// Render tokenized paragraphs, joined by a blank line.
    pub fn render(&self, paragraphs: &[Vec<Token>]) -> String {
        paragraphs
            .iter()
            .map(|tokens| self.render_paragraph(tokens))
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR)
    }

    fn render_paragraph(&self, tokens: &[Token]) -> String {
        let mut pieces: Vec<String> = Vec::new();
        let mut pending_open = String::new();

        for (i, token) in tokens.iter().enumerate() {
            let is_last = i + 1 == tokens.len();
            let next_is_punct = tokens.get(i + 1).map_or(false, Token::is_punctuation);

            let unit = match token.kind {
                TokenKind::Punctuation(Binding::Open) => {
                    pending_open.push_str(&markup::escape(&token.text));
                    continue;
                }
                TokenKind::Punctuation(Binding::Close) => {
                    let text = markup::escape(&token.text);
                    match pieces.last_mut() {
                        Some(last) => last.push_str(&text),
                        None => pieces.push(text),
                    }
                    if !is_last && !next_is_punct {
                        pieces.push(WORD_SEPARATOR.to_string());
                    }
                    continue;
                }
                TokenKind::HanziWord => colorize_word(self.config, self.romanizer, &token.text),
                TokenKind::LatinRun => markup::escape(&token.text),
            };

            pieces.push(std::mem::take(&mut pending_open) + &unit);
            if !(next_is_punct || is_last) {
                pieces.push(WORD_SEPARATOR.to_string());
            }
        }

        if !pending_open.is_empty() {
            pieces.push(pending_open);
        }

        pieces.concat()
    }
}
