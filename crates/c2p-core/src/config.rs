//! Immutable formatting configuration.
//!
//! A single [`FormatConfig`] is built per invocation (defaults, optionally
//! overlaid by a TOML file) and passed by reference into every component.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{C2pError, Result};
use crate::token::Binding;
use crate::tone::ToneClass;
use crate::vocabulary::HskLevel;

// ---------------------------------------------------------------------------
// RomanizationStyle
// ---------------------------------------------------------------------------

/// Tone notation used for every romanized syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RomanizationStyle {
    /// Diacritic marks, e.g. `nǐ hǎo`.
    #[default]
    Tone,
    /// Trailing digits, e.g. `ni3 hao3`.
    Numeric,
}

// ---------------------------------------------------------------------------
// DuplicatePolicy
// ---------------------------------------------------------------------------

/// What the vocabulary index does when two rows share a Hanzi key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the row seen first (lowest level in level-sorted datasets).
    #[default]
    FirstWins,
    /// Keep the row seen last.
    LastWins,
}

// ---------------------------------------------------------------------------
// ToneColors
// ---------------------------------------------------------------------------

/// Color names (xcolor syntax) per tone class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneColors {
    pub first: String,
    pub second: String,
    pub third: String,
    pub fourth: String,
    pub neutral: String,
}

impl Default for ToneColors {
    fn default() -> Self {
        Self {
            first: "red".to_string(),
            second: "green!50!black".to_string(),
            third: "blue".to_string(),
            fourth: "orange".to_string(),
            neutral: "gray".to_string(),
        }
    }
}

impl ToneColors {
    pub fn color(&self, tone: ToneClass) -> &str {
        match tone {
            ToneClass::First => &self.first,
            ToneClass::Second => &self.second,
            ToneClass::Third => &self.third,
            ToneClass::Fourth => &self.fourth,
            ToneClass::Neutral => &self.neutral,
        }
    }
}

// ---------------------------------------------------------------------------
// PunctuationClasses
// ---------------------------------------------------------------------------

/// Open and close punctuation character classes.
///
/// A character may belong to at most one class; [`FormatConfig::validate`]
/// rejects overlapping classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PunctuationClasses {
    /// Characters that bind to the following token.
    pub open: String,
    /// Characters that bind to the preceding token.
    pub close: String,
}

impl Default for PunctuationClasses {
    fn default() -> Self {
        Self {
            open: "“‘（《〈【『「〖〔［｛".to_string(),
            close: "，。？！：；、”’）》〉】』」〗〕］｝…—".to_string(),
        }
    }
}

impl PunctuationClasses {
    /// Binding direction of `ch`, or `None` if it is in neither class.
    pub fn binding(&self, ch: char) -> Option<Binding> {
        if self.open.contains(ch) {
            Some(Binding::Open)
        } else if self.close.contains(ch) {
            Some(Binding::Close)
        } else {
            None
        }
    }

    fn overlap(&self) -> Option<char> {
        self.open.chars().find(|c| self.close.contains(*c))
    }
}

// ---------------------------------------------------------------------------
// FormatConfig
// ---------------------------------------------------------------------------

/// Number of HSK levels that carry a highlight color.
pub const LEVEL_COUNT: usize = 6;

/// Master configuration shared by the tokenizer, index builder and renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub romanization: RomanizationStyle,
    pub tone_colors: ToneColors,
    /// Highlight colors for HSK levels 1 through 6, in order.
    pub level_colors: Vec<String>,
    pub punctuation: PunctuationClasses,
    /// Main CJK font; a system font name or a path to a font file.
    pub font: String,
    pub duplicate_policy: DuplicatePolicy,
    /// Extra word readings for the romanizer, tone-marked and space
    /// separated (`"银行" = "yín háng"`). They take precedence over the
    /// bundled phrase table.
    pub phrases: BTreeMap<String, String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            romanization: RomanizationStyle::default(),
            tone_colors: ToneColors::default(),
            level_colors: ["green!20", "cyan!20", "blue!20", "orange!20", "red!20", "purple!20"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            punctuation: PunctuationClasses::default(),
            font: "Noto Serif CJK SC".to_string(),
            duplicate_policy: DuplicatePolicy::default(),
            phrases: BTreeMap::new(),
        }
    }
}

impl FormatConfig {
    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded format configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.level_colors.len() != LEVEL_COUNT {
            return Err(C2pError::Config(format!(
                "expected {} level colors, got {}",
                LEVEL_COUNT,
                self.level_colors.len()
            )));
        }
        if let Some(ch) = self.punctuation.overlap() {
            return Err(C2pError::Config(format!(
                "punctuation {:?} is in both the open and close classes",
                ch
            )));
        }
        for (word, reading) in &self.phrases {
            let chars = word.chars().count();
            let syllables = reading.split_whitespace().count();
            if chars == 0 || chars != syllables {
                return Err(C2pError::Config(format!(
                    "phrase {:?} has {} characters but reading {:?} has {} syllables",
                    word, chars, reading, syllables
                )));
            }
        }
        Ok(())
    }

    pub fn tone_color(&self, tone: ToneClass) -> &str {
        self.tone_colors.color(tone)
    }

    pub fn level_color(&self, level: HskLevel) -> &str {
        self.level_colors
            .get(usize::from(level.get()) - 1)
            .map(String::as_str)
            .unwrap_or("yellow!20")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let cfg = FormatConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.romanization, RomanizationStyle::Tone);
        assert_eq!(cfg.duplicate_policy, DuplicatePolicy::FirstWins);
    }

    #[test]
    fn default_punctuation_bindings() {
        let p = PunctuationClasses::default();
        assert_eq!(p.binding('（'), Some(Binding::Open));
        assert_eq!(p.binding('“'), Some(Binding::Open));
        assert_eq!(p.binding('，'), Some(Binding::Close));
        assert_eq!(p.binding('…'), Some(Binding::Close));
        assert_eq!(p.binding('\''), None);
        assert_eq!(p.binding(','), None);
    }

    #[test]
    fn tone_and_level_colors() {
        let cfg = FormatConfig::default();
        assert_eq!(cfg.tone_color(ToneClass::Third), "blue");
        assert_eq!(cfg.tone_color(ToneClass::Neutral), "gray");
        assert_eq!(cfg.level_color(HskLevel::new(1).unwrap()), "green!20");
        assert_eq!(cfg.level_color(HskLevel::new(6).unwrap()), "purple!20");
    }

    #[test]
    fn toml_overrides_merge_with_defaults() {
        let cfg = FormatConfig::from_toml_str(
            r#"
            romanization = "numeric"
            font = "KaiTi"

            [tone_colors]
            first = "magenta"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.romanization, RomanizationStyle::Numeric);
        assert_eq!(cfg.font, "KaiTi");
        assert_eq!(cfg.tone_colors.first, "magenta");
        assert_eq!(cfg.tone_colors.second, "green!50!black");
        assert_eq!(cfg.level_colors.len(), LEVEL_COUNT);
    }

    #[test]
    fn overlapping_punctuation_rejected() {
        let result = FormatConfig::from_toml_str(
            r#"
            [punctuation]
            open = "（"
            close = "（）"
            "#,
        );
        assert!(matches!(result, Err(C2pError::Config(_))));
    }

    #[test]
    fn wrong_level_color_count_rejected() {
        let result = FormatConfig::from_toml_str(r#"level_colors = ["red"]"#);
        assert!(matches!(result, Err(C2pError::Config(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "duplicate_policy = \"last_wins\"").unwrap();
        let cfg = FormatConfig::load(file.path()).unwrap();
        assert_eq!(cfg.duplicate_policy, DuplicatePolicy::LastWins);
    }

    #[test]
    fn phrase_table_from_toml() {
        let cfg = FormatConfig::from_toml_str(
            r#"
            [phrases]
            "银行" = "yín háng"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.phrases.get("银行").map(String::as_str), Some("yín háng"));
        assert!(FormatConfig::default().phrases.is_empty());
    }

    #[test]
    fn phrase_syllable_count_must_match() {
        let result = FormatConfig::from_toml_str(
            r#"
            [phrases]
            "音乐" = "yīn"
            "#,
        );
        assert!(matches!(result, Err(C2pError::Config(_))));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let result = FormatConfig::from_toml_str("romanization = 3");
        assert!(matches!(result, Err(C2pError::Toml(_))));
    }
}
