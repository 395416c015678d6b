//! Vocabulary section: every recognized word of the text, grouped by level.

use std::collections::{BTreeMap, BTreeSet};

use c2p_core::{FormatConfig, HskLevel, TokenKind, VocabularyEntry, VocabularyIndex};
use c2p_text::{Segmenter, Tokenizer};

use crate::annotate::Annotator;

const TABLE_HEADER: &str =
    "\\textbf{Hanzi} & \\textbf{Pinyin} & \\textbf{POS} & \\textbf{Audio} & \\textbf{English}\\\\";
const COLSPEC: &str = "cccc p{0.5\\linewidth}";

pub struct VocabularySection<'a> {
    config: &'a FormatConfig,
    segmenter: &'a dyn Segmenter,
    index: &'a VocabularyIndex,
}

impl<'a> VocabularySection<'a> {
    pub fn new(
        config: &'a FormatConfig,
        segmenter: &'a dyn Segmenter,
        index: &'a VocabularyIndex,
    ) -> Self {
        Self {
            config,
            segmenter,
            index,
        }
    }

    /// Distinct recognized entries per level.
    pub fn collect(&self, text: &str) -> BTreeMap<HskLevel, BTreeSet<&'a str>> {
        let mut by_level: BTreeMap<HskLevel, BTreeSet<&'a str>> = BTreeMap::new();
        if self.index.is_empty() {
            return by_level;
        }

        let annotator = Annotator::new(self.config, self.index);
        let tokenizer = Tokenizer::new(&self.config.punctuation, self.segmenter);
        for token in tokenizer.tokenize(text) {
            if token.kind != TokenKind::HanziWord {
                continue;
            }
            for entry in annotator.recognized(&token.text) {
                by_level.entry(entry.level).or_default().insert(entry.hanzi.as_str());
            }
        }
        by_level
    }

    /// Render the section body, or an empty string when nothing in `text` is
    /// in the index (the caller then omits the section).
    pub fn build(&self, text: &str) -> String {
        let by_level = self.collect(text);
        if by_level.is_empty() {
            return String::new();
        }

        let mut parts: Vec<String> = Vec::new();
        for (level, words) in &by_level {
            let entries: Vec<&VocabularyEntry> =
                words.iter().filter_map(|w| self.index.get(w)).collect();
            parts.push(format!("\\subsection*{{{}}}", level.label()));
            parts.push(format!("\\begin{{longtable}}{{{}}}", COLSPEC));
            // header, first page
            parts.push("\\hline".into());
            parts.push(TABLE_HEADER.into());
            parts.push("\\hline".into());
            parts.push("\\endfirsthead".into());
            // header, continuation pages
            parts.push("\\hline".into());
            parts.push(TABLE_HEADER.into());
            parts.push("\\hline".into());
            parts.push("\\endhead".into());
            // footer, non-final pages
            parts.push("\\hline".into());
            parts.push("\\multicolumn{5}{r}{\\footnotesize Continued on next page}\\\\".into());
            parts.push("\\endfoot".into());
            // footer, last page
            parts.push("\\hline".into());
            parts.push("\\endlastfoot".into());

            for entry in entries {
                parts.push(format!(
                    "{} & {} & {} & {} & {}\\\\",
                    entry.hanzi, entry.pinyin_colored, entry.pos, entry.audio, entry.english
                ));
            }

            parts.push("\\end{longtable}".into());
            parts.push(String::new());
        }

        tracing::debug!(levels = by_level.len(), "built vocabulary section");
        parts.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn recurring_word_listed_once() {
        let cfg = FormatConfig::default();
        let index = testing::index(&cfg, &[(1, "你好", "nǐ hǎo", "hello", "interj")]);
        let seg = testing::segmenter();
        let section = VocabularySection::new(&cfg, &seg, &index);

        let text = "你好，世界！\n\n你好你好。";
        let by_level = section.collect(text);
        assert_eq!(by_level.len(), 1);
        let level1: Vec<&str> = by_level[&HskLevel::new(1).unwrap()].iter().copied().collect();
        assert_eq!(level1, vec!["你好"]);

        let out = section.build(text);
        assert_eq!(out.matches("\\subsection*{HSK 1}").count(), 1);
        assert_eq!(out.matches("你好 & ").count(), 1);
        assert!(out.contains("你好 & \\pysyl{blue}{nǐ}\\pysyl{blue}{hǎo} & interj &  & Hello\\\\"));
    }

    #[test]
    fn levels_ascending_words_sorted() {
        let cfg = FormatConfig::default();
        let index = testing::index(
            &cfg,
            &[
                (3, "界", "jiè", "boundary", "n"),
                (2, "世", "shì", "world", "n"),
                (3, "文", "wén", "writing", "n"),
                (1, "中", "zhōng", "middle", "n"),
            ],
        );
        // No whole-word entries: falls back to characters.
        let seg = testing::segmenter();
        let out = VocabularySection::new(&cfg, &seg, &index).build("世界中文");

        let hsk1 = out.find("HSK 1").unwrap();
        let hsk2 = out.find("HSK 2").unwrap();
        let hsk3 = out.find("HSK 3").unwrap();
        assert!(hsk1 < hsk2 && hsk2 < hsk3);

        let jie = out.find("界 & ").unwrap();
        let wen = out.find("文 & ").unwrap();
        // Lexicographic (code point) order within a level: 文 (U+6587) < 界 (U+754C).
        assert!(wen < jie);
    }

    #[test]
    fn nothing_recognized_is_empty() {
        let cfg = FormatConfig::default();
        let index = testing::index(&cfg, &[(1, "猫", "māo", "cat", "n")]);
        let seg = testing::segmenter();
        assert_eq!(VocabularySection::new(&cfg, &seg, &index).build("你好"), "");
    }

    #[test]
    fn empty_index_or_text_is_empty() {
        let cfg = FormatConfig::default();
        let seg = testing::segmenter();
        let empty = VocabularyIndex::empty();
        assert_eq!(VocabularySection::new(&cfg, &seg, &empty).build("你好"), "");

        let index = testing::index(&cfg, &[(1, "你好", "nǐ hǎo", "hello", "interj")]);
        assert_eq!(VocabularySection::new(&cfg, &seg, &index).build(""), "");
    }

    #[test]
    fn table_structure() {
        let cfg = FormatConfig::default();
        let index = testing::index(&cfg, &[(2, "世界", "shì jiè", "world", "n")]);
        let seg = testing::segmenter();
        let out = VocabularySection::new(&cfg, &seg, &index).build("世界");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "\\subsection*{HSK 2}");
        assert_eq!(lines[1], "\\begin{longtable}{cccc p{0.5\\linewidth}}");
        assert!(out.contains("\\endfirsthead"));
        assert!(out.contains("\\endlastfoot"));
        assert!(out.trim_end().ends_with("\\end{longtable}"));
    }
}
