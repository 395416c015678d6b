//! Chinese word segmentation.
//!
//! The tokenizer hands every maximal Hanzi run to a [`Segmenter`]. Two
//! implementations are provided:
//! - [`JiebaSegmenter`]: jieba-rs with its bundled dictionary, HMM disabled
//!   so unknown words never get merged statistically;
//! - [`DictionarySegmenter`]: forward maximum matching over a caller-supplied
//!   word list (for example the vocabulary index keys).

use std::collections::HashSet;

use c2p_core::VocabularyIndex;

/// Splits a run of Hanzi into words.
///
/// The returned words are non-empty and concatenate back to `run`.
pub trait Segmenter {
    fn segment(&self, run: &str) -> Vec<String>;
}

// ---------------------------------------------------------------------------
// JiebaSegmenter
// ---------------------------------------------------------------------------

/// Dictionary-based segmentation backed by jieba-rs.
pub struct JiebaSegmenter {
    jieba: jieba_rs::Jieba,
}

impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl JiebaSegmenter {
    /// Load the bundled jieba dictionary.
    pub fn new() -> Self {
        Self {
            jieba: jieba_rs::Jieba::new(),
        }
    }
}

impl Segmenter for JiebaSegmenter {
    fn segment(&self, run: &str) -> Vec<String> {
        self.jieba
            .cut(run, false)
            .into_iter()
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// DictionarySegmenter
// ---------------------------------------------------------------------------

/// Greedy forward maximum matching; characters not starting any dictionary
/// word become single-character words.
#[derive(Debug, Clone, Default)]
pub struct DictionarySegmenter {
    words: HashSet<String>,
    /// Length in chars of the longest dictionary word.
    max_len: usize,
}

impl DictionarySegmenter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: HashSet<String> = words
            .into_iter()
            .map(Into::into)
            .filter(|w: &String| !w.is_empty())
            .collect();
        let max_len = words.iter().map(|w| w.chars().count()).max().unwrap_or(1);
        Self { words, max_len }
    }

    /// Use every key of `index` as a dictionary word.
    pub fn from_index(index: &VocabularyIndex) -> Self {
        Self::new(index.keys())
    }
}

impl Segmenter for DictionarySegmenter {
    fn segment(&self, run: &str) -> Vec<String> {
        let chars: Vec<char> = run.chars().collect();
        let mut words = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let longest = self.max_len.min(chars.len() - i);
            let matched = (2..=longest).rev().find_map(|len| {
                let candidate: String = chars[i..i + len].iter().collect();
                self.words.contains(&candidate).then_some((candidate, len))
            });
            match matched {
                Some((word, len)) => {
                    words.push(word);
                    i += len;
                }
                None => {
                    words.push(chars[i].to_string());
                    i += 1;
                }
            }
        }

        words
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
