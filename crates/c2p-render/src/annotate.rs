//! Vocabulary lookup for Hanzi words.
//!
//! A word is looked up whole first. When the whole word is unknown, each of
//! its characters is looked up on its own; the renderers and the vocabulary
//! section both follow this rule through [`Annotator`].

use c2p_core::markup;
use c2p_core::{FormatConfig, VocabularyEntry, VocabularyIndex};

/// Outcome of looking up one Hanzi word.
#[derive(Debug, PartialEq)]
pub enum Lookup<'a> {
    /// The whole word is in the index.
    Word(&'a VocabularyEntry),
    /// Per character, in order; `None` for unknown characters.
    Chars(Vec<(char, Option<&'a VocabularyEntry>)>),
}

pub struct Annotator<'a> {
    config: &'a FormatConfig,
    index: &'a VocabularyIndex,
}

impl<'a> Annotator<'a> {
    pub fn new(config: &'a FormatConfig, index: &'a VocabularyIndex) -> Self {
        Self { config, index }
    }

    pub fn lookup(&self, word: &str) -> Lookup<'a> {
        if let Some(entry) = self.index.get(word) {
            return Lookup::Word(entry);
        }
        let mut buf = [0u8; 4];
        Lookup::Chars(
            word.chars()
                .map(|ch| (ch, self.index.get(ch.encode_utf8(&mut buf))))
                .collect(),
        )
    }

    /// Entries recognized in `word`, whole word preferred.
    pub fn recognized(&self, word: &str) -> Vec<&'a VocabularyEntry> {
        match self.lookup(word) {
            Lookup::Word(entry) => vec![entry],
            Lookup::Chars(chars) => chars.into_iter().filter_map(|(_, e)| e).collect(),
        }
    }

    /// `word` with every recognized unit highlighted in its level color and
    /// carrying its tooltip. Unknown characters are left bare.
    pub fn annotate(&self, word: &str) -> String {
        match self.lookup(word) {
            Lookup::Word(entry) => self.mark(word, entry),
            Lookup::Chars(chars) => chars
                .into_iter()
                .map(|(ch, entry)| match entry {
                    Some(entry) => self.mark(ch.encode_utf8(&mut [0u8; 4]), entry),
                    None => ch.to_string(),
                })
                .collect(),
        }
    }

    fn mark(&self, text: &str, entry: &VocabularyEntry) -> String {
        let visible = markup::highlight(text, self.config.level_color(entry.level));
        markup::tooltip(&visible, &entry.tip)
    }
}
