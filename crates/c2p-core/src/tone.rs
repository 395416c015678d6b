//! Tone classification of romanized syllables.
//!
//! Accepts both notations emitted by the romanizer:
//! - numeric (`"ma3"`): the trailing digit is the tone;
//! - diacritic (`"mǎ"`): the first marked vowel decides the tone.
//!
//! Anything else is the neutral tone.

use serde::{Deserialize, Serialize};

/// One of the four Mandarin tones plus the neutral tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneClass {
    First,
    Second,
    Third,
    Fourth,
    Neutral,
}

impl ToneClass {
    pub const ALL: [ToneClass; 5] = [
        ToneClass::First,
        ToneClass::Second,
        ToneClass::Third,
        ToneClass::Fourth,
        ToneClass::Neutral,
    ];

    /// Tone number in `1..=5`.
    pub fn number(self) -> u8 {
        match self {
            ToneClass::First => 1,
            ToneClass::Second => 2,
            ToneClass::Third => 3,
            ToneClass::Fourth => 4,
            ToneClass::Neutral => 5,
        }
    }

    /// Map a tone digit to its class. Any digit other than `1..=4` is neutral.
    pub fn from_digit(digit: char) -> Self {
        match digit {
            '1' => ToneClass::First,
            '2' => ToneClass::Second,
            '3' => ToneClass::Third,
            '4' => ToneClass::Fourth,
            _ => ToneClass::Neutral,
        }
    }

    fn from_diacritic(ch: char) -> Option<Self> {
        match ch {
            'ā' | 'ē' | 'ī' | 'ō' | 'ū' | 'ǖ' => Some(ToneClass::First),
            'á' | 'é' | 'í' | 'ó' | 'ú' | 'ǘ' => Some(ToneClass::Second),
            'ǎ' | 'ě' | 'ǐ' | 'ǒ' | 'ǔ' | 'ǚ' => Some(ToneClass::Third),
            'à' | 'è' | 'ì' | 'ò' | 'ù' | 'ǜ' => Some(ToneClass::Fourth),
            _ => None,
        }
    }
}

/// Classify a romanized syllable. Total over every input string.
pub fn classify(syllable: &str) -> ToneClass {
    if let Some(last) = syllable.chars().last() {
        if last.is_ascii_digit() {
            return ToneClass::from_digit(last);
        }
    }
    syllable
        .chars()
        .find_map(ToneClass::from_diacritic)
        .unwrap_or(ToneClass::Neutral)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
