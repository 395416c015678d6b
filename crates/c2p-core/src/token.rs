use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Character classes
// ---------------------------------------------------------------------------

/// Return `true` if `ch` is a CJK Unified Ideograph (U+4E00..=U+9FFF).
pub fn is_hanzi(ch: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&ch)
}

/// Return `true` if `ch` may start or continue a Hanzi run.
///
/// Runs are wider than [`is_hanzi`]: they also cover CJK Extension A
/// (U+3400..=U+4DBF) so such characters reach the segmenter together with
/// their neighbours.
pub fn is_hanzi_run_char(ch: char) -> bool {
    ('\u{3400}'..='\u{9FFF}').contains(&ch)
}

/// Return `true` if `text` is non-empty and every character satisfies
/// [`is_hanzi`].
pub fn is_hanzi_word(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_hanzi)
}

// ---------------------------------------------------------------------------
// Binding / TokenKind / Token
// ---------------------------------------------------------------------------

/// Which neighbour a punctuation mark attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    /// Binds to the following token (e.g. `（`, `“`).
    Open,
    /// Binds to the preceding token (e.g. `，`, `）`).
    Close,
}

/// Semantic category of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// A segmented word made only of CJK Unified Ideographs.
    HanziWord,
    /// Latin letters, digits, spaces and any punctuation outside the
    /// open/close classes.
    LatinRun,
    /// A single open or close punctuation character.
    Punctuation(Binding),
}

/// Atomic unit of a paragraph produced by the tokenizer.
///
/// Concatenating the `text` of every token of a paragraph yields the
/// paragraph unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn hanzi(text: impl Into<String>) -> Self {
        Self::new(text, TokenKind::HanziWord)
    }

    pub fn latin(text: impl Into<String>) -> Self {
        Self::new(text, TokenKind::LatinRun)
    }

    pub fn punct(ch: char, binding: Binding) -> Self {
        Self::new(ch.to_string(), TokenKind::Punctuation(binding))
    }

    pub fn is_punctuation(&self) -> bool {
        matches!(self.kind, TokenKind::Punctuation(_))
    }

    pub fn binding(&self) -> Option<Binding> {
        match self.kind {
            TokenKind::Punctuation(b) => Some(b),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
