//! Word romanization.
//!
//! Characters have one default reading each, which is wrong for many common
//! words (`银行` is `yín háng`, not `yín xíng`). [`PinyinRomanizer`] first
//! looks for the longest phrase reading starting at each position of a word
//! and only falls back to per-character readings where no phrase matches.

use std::collections::HashMap;

use pinyin::ToPinyin;

use c2p_core::{C2pError, Result, RomanizationStyle};

const BUNDLED_PHRASES: &str = include_str!("../data/phrases.txt");

/// Maps Hanzi to romanized syllables.
pub trait Romanizer {
    /// Syllable for `ch`, or [`C2pError::UnrecognizedCharacter`] when no
    /// reading is known.
    fn syllable(&self, ch: char, style: RomanizationStyle) -> Result<String>;

    /// One syllable per character of `word`. Characters without a reading
    /// are left out.
    fn romanize_word(&self, word: &str, style: RomanizationStyle) -> Vec<String> {
        word.chars()
            .filter_map(|ch| self.syllable(ch, style).ok())
            .collect()
    }
}

/// Romanizer backed by the `pinyin` crate's default readings and a phrase
/// table for words whose reading differs from them.
#[derive(Debug, Clone)]
pub struct PinyinRomanizer {
    /// Word to tone-marked syllables, one per character.
    phrases: HashMap<String, Vec<String>>,
    /// Length in chars of the longest phrase.
    max_len: usize,
}

impl Default for PinyinRomanizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PinyinRomanizer {
    /// Default readings plus the bundled phrase table.
    pub fn new() -> Self {
        let mut romanizer = Self::without_phrases();
        for line in BUNDLED_PHRASES.lines() {
            let line = line.split('#').next().unwrap_or_default().trim();
            if let Some((word, reading)) = line.split_once(char::is_whitespace) {
                romanizer.insert(word, reading);
            }
        }
        romanizer
    }

    /// Per-character default readings only.
    pub fn without_phrases() -> Self {
        Self {
            phrases: HashMap::new(),
            max_len: 0,
        }
    }

    /// Add phrase readings, replacing existing entries for the same word.
    /// A reading whose syllable count differs from the word's character
    /// count is ignored.
    pub fn with_phrases<I, K, V>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (word, reading) in phrases {
            self.insert(word.as_ref(), reading.as_ref());
        }
        self
    }

    fn insert(&mut self, word: &str, reading: &str) -> bool {
        let syllables: Vec<String> = reading.split_whitespace().map(str::to_string).collect();
        let len = word.chars().count();
        if len == 0 || len != syllables.len() {
            return false;
        }
        self.max_len = self.max_len.max(len);
        self.phrases.insert(word.to_string(), syllables);
        true
    }

    /// Longest phrase that is a prefix of `chars`.
    fn phrase_at(&self, chars: &[char]) -> Option<(usize, &[String])> {
        let longest = self.max_len.min(chars.len());
        (1..=longest).rev().find_map(|len| {
            let candidate: String = chars[..len].iter().collect();
            self.phrases.get(&candidate).map(|s| (len, s.as_slice()))
        })
    }
}

impl Romanizer for PinyinRomanizer {
    fn syllable(&self, ch: char, style: RomanizationStyle) -> Result<String> {
        let reading = ch.to_pinyin().ok_or(C2pError::UnrecognizedCharacter(ch))?;
        let syl = match style {
            RomanizationStyle::Tone => reading.with_tone(),
            RomanizationStyle::Numeric => reading.with_tone_num_end(),
        };
        Ok(syl.to_string())
    }

    fn romanize_word(&self, word: &str, style: RomanizationStyle) -> Vec<String> {
        let chars: Vec<char> = word.chars().collect();
        let mut out = Vec::with_capacity(chars.len());
        let mut i = 0;

        while i < chars.len() {
            match self.phrase_at(&chars[i..]) {
                Some((len, reading)) => {
                    out.extend(reading.iter().map(|syl| match style {
                        RomanizationStyle::Tone => syl.clone(),
                        RomanizationStyle::Numeric => tone_number_end(syl),
                    }));
                    i += len;
                }
                None => {
                    if let Ok(syl) = self.syllable(chars[i], style) {
                        out.push(syl);
                    }
                    i += 1;
                }
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// `"háng"` → `"hang2"`; unmarked (neutral) syllables get no digit.
fn tone_number_end(syllable: &str) -> String {
    let mut out = String::with_capacity(syllable.len() + 1);
    let mut tone = None;
    for ch in syllable.chars() {
        match strip_tone_mark(ch) {
            Some((base, digit)) => {
                out.push(base);
                tone = Some(digit);
            }
            None => out.push(ch),
        }
    }
    out.extend(tone);
    out
}

fn strip_tone_mark(ch: char) -> Option<(char, char)> {
    let stripped = match ch {
        'ā' => ('a', '1'),
        'á' => ('a', '2'),
        'ǎ' => ('a', '3'),
        'à' => ('a', '4'),
        'ē' => ('e', '1'),
        'é' => ('e', '2'),
        'ě' => ('e', '3'),
        'è' => ('e', '4'),
        'ī' => ('i', '1'),
        'í' => ('i', '2'),
        'ǐ' => ('i', '3'),
        'ì' => ('i', '4'),
        'ō' => ('o', '1'),
        'ó' => ('o', '2'),
        'ǒ' => ('o', '3'),
        'ò' => ('o', '4'),
        'ū' => ('u', '1'),
        'ú' => ('u', '2'),
        'ǔ' => ('u', '3'),
        'ù' => ('u', '4'),
        'ǖ' => ('ü', '1'),
        'ǘ' => ('ü', '2'),
        'ǚ' => ('ü', '3'),
        'ǜ' => ('ü', '4'),
        'ḿ' => ('m', '2'),
        'ń' => ('n', '2'),
        'ň' => ('n', '3'),
        'ǹ' => ('n', '4'),
        _ => return None,
    };
    Some(stripped)
}
