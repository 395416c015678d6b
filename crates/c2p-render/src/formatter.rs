//! End-to-end text formatting.
//!
//! [`TextFormatter`] is the primary entry point. It splits the text into
//! paragraphs, tokenizes each paragraph once, then feeds the same token
//! sequences to the three renderers and builds the vocabulary section, all
//! against one shared [`VocabularyIndex`].

use serde::{Deserialize, Serialize};

use c2p_core::{FormatConfig, Token, VocabularyIndex};
use c2p_text::{split_paragraphs, Romanizer, Segmenter, Tokenizer};

use crate::hanzi::{HanziMode, HanziRenderer};
use crate::pinyin::PinyinRenderer;
use crate::vocabulary::VocabularySection;

// ---------------------------------------------------------------------------
// RenderedBodies
// ---------------------------------------------------------------------------

/// The markup bodies spliced into the document template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedBodies {
    /// Hanzi only, with vocabulary highlights.
    pub hanzi: String,
    /// Hanzi with interlinear pinyin.
    pub ruby: String,
    /// Pinyin only.
    pub pinyin: String,
    /// Vocabulary tables; empty when no word of the text is in the index.
    pub vocabulary: String,
}

impl RenderedBodies {
    pub fn has_vocabulary(&self) -> bool {
        !self.vocabulary.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TextFormatter
// ---------------------------------------------------------------------------

pub struct TextFormatter<'a> {
    config: &'a FormatConfig,
    segmenter: &'a dyn Segmenter,
    romanizer: &'a dyn Romanizer,
    index: &'a VocabularyIndex,
}

impl<'a> TextFormatter<'a> {
    pub fn new(
        config: &'a FormatConfig,
        segmenter: &'a dyn Segmenter,
        romanizer: &'a dyn Romanizer,
        index: &'a VocabularyIndex,
    ) -> Self {
        Self {
            config,
            segmenter,
            romanizer,
            index,
        }
    }

    /// Paragraphs of `text`, each as its token sequence.
    pub fn tokenize_paragraphs(&self, text: &str) -> Vec<Vec<Token>> {
        let tokenizer = Tokenizer::new(&self.config.punctuation, self.segmenter);
        split_paragraphs(text)
            .iter()
            .map(|p| tokenizer.tokenize(p))
            .collect()
    }

    /// Render every body for `text`.
    pub fn format(&self, text: &str) -> RenderedBodies {
        let paragraphs = self.tokenize_paragraphs(text);

        let hanzi_renderer = HanziRenderer::new(self.config, self.romanizer, self.index);
        let bodies = RenderedBodies {
            hanzi: hanzi_renderer.render(&paragraphs, HanziMode::Plain),
            ruby: hanzi_renderer.render(&paragraphs, HanziMode::Ruby),
            pinyin: PinyinRenderer::new(self.config, self.romanizer).render(&paragraphs),
            vocabulary: VocabularySection::new(self.config, self.segmenter, self.index).build(text),
        };

        tracing::debug!(
            paragraphs = paragraphs.len(),
            tokens = paragraphs.iter().map(Vec::len).sum::<usize>(),
            vocabulary = bodies.has_vocabulary(),
            "formatted text"
        );
        bodies
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
