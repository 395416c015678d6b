//! Hanzi renderings: plain and ruby-annotated.
//!
//! Every Hanzi word and Latin run is wrapped in `\ruby{..}{..}` so both modes
//! break lines at the same places; plain mode simply leaves the annotation
//! empty. Punctuation is emitted bare so it stays glued to its neighbour.

use c2p_core::markup::{self, PARAGRAPH_SEPARATOR};
use c2p_core::{FormatConfig, Token, TokenKind, VocabularyIndex};
use c2p_text::Romanizer;

use crate::annotate::Annotator;
use crate::pinyin::colorize_word;

/// Which Hanzi rendering to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HanziMode {
    /// Hanzi only, each word in an empty ruby.
    Plain,
    /// Hanzi with tone-colored pinyin above each word.
    Ruby,
}

pub struct HanziRenderer<'a> {
    config: &'a FormatConfig,
    romanizer: &'a dyn Romanizer,
    annotator: Annotator<'a>,
}

impl<'a> HanziRenderer<'a> {
    pub fn new(
        config: &'a FormatConfig,
        romanizer: &'a dyn Romanizer,
        index: &'a VocabularyIndex,
    ) -> Self {
        Self {
            config,
            romanizer,
            annotator: Annotator::new(config, index),
        }
    }

    /// Render tokenized paragraphs, joined by a blank line.
    pub fn render(&self, paragraphs: &[Vec<Token>], mode: HanziMode) -> String {
        paragraphs
            .iter()
            .map(|tokens| self.render_paragraph(tokens, mode))
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR)
    }

    fn render_paragraph(&self, tokens: &[Token], mode: HanziMode) -> String {
        let mut out = String::new();
        for token in tokens {
            match token.kind {
                TokenKind::HanziWord => {
                    let word = self.annotator.annotate(&token.text);
                    let annotation = match mode {
                        HanziMode::Ruby => colorize_word(self.config, self.romanizer, &token.text),
                        HanziMode::Plain => String::new(),
                    };
                    out.push_str(&markup::ruby(&word, &annotation));
                }
                TokenKind::Punctuation(_) => out.push_str(&markup::escape(&token.text)),
                TokenKind::LatinRun => {
                    out.push_str(&markup::ruby(&markup::escape(&token.text), ""));
                }
            }
        }
        out
    }
}
