//! Shared fixtures for renderer tests.

use std::collections::HashMap;

use c2p_core::{
    C2pError, FormatConfig, IndexBuilder, Result, RomanizationStyle, Token, VocabularyIndex,
    VocabularyRow,
};
use c2p_core::vocabulary::LevelCell;
use c2p_text::{DictionarySegmenter, Romanizer, Tokenizer};

/// Fixed readings so expected markup does not depend on heteronym choice.
pub struct TableRomanizer(HashMap<char, &'static str>);

impl TableRomanizer {
    pub fn new() -> Self {
        Self(
            [
                ('你', "nǐ"),
                ('好', "hǎo"),
                ('世', "shì"),
                ('界', "jiè"),
                ('中', "zhōng"),
                ('文', "wén"),
                ('的', "de"),
            ]
            .into_iter()
            .collect(),
        )
    }
}

impl Romanizer for TableRomanizer {
    fn syllable(&self, ch: char, _style: RomanizationStyle) -> Result<String> {
        self.0
            .get(&ch)
            .map(|s| s.to_string())
            .ok_or(C2pError::UnrecognizedCharacter(ch))
    }
}

pub fn segmenter() -> DictionarySegmenter {
    DictionarySegmenter::new(["你好", "世界", "中文"])
}

pub fn paragraphs(config: &FormatConfig, texts: &[&str]) -> Vec<Vec<Token>> {
    let seg = segmenter();
    let tokenizer = Tokenizer::new(&config.punctuation, &seg);
    texts.iter().map(|t| tokenizer.tokenize(t)).collect()
}

/// Index from `(level, hanzi, pinyin, english, pos)` tuples.
pub fn index(config: &FormatConfig, rows: &[(u8, &str, &str, &str, &str)]) -> VocabularyIndex {
    let rows = rows.iter().map(|(level, hanzi, pinyin, english, pos)| {
        Ok(VocabularyRow {
            level: Some(LevelCell(level.to_string())),
            hanzi: Some(hanzi.to_string()),
            pinyin_tone: Some(pinyin.to_string()),
            english: Some(english.to_string()),
            pos: Some(pos.to_string()),
            ..Default::default()
        })
    });
    IndexBuilder::new(config).build(rows).0
}
