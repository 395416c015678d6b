//! HSK vocabulary index.
//!
//! Rows arrive from a CSV or JSON table with loosely-typed columns. Each row
//! is validated into a [`VocabularyEntry`]; rows that fail validation are
//! reported as [`C2pError::MalformedInputRow`] and skipped, so one bad line
//! never aborts the load.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{DuplicatePolicy, FormatConfig, RomanizationStyle};
use crate::error::{C2pError, Result};
use crate::hash::digest_lines;
use crate::markup;
use crate::tone::classify;

// ---------------------------------------------------------------------------
// HskLevel
// ---------------------------------------------------------------------------

/// HSK proficiency tier, always within `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct HskLevel(u8);

impl HskLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Human label, e.g. `"HSK 3"`.
    pub fn label(self) -> String {
        format!("HSK {}", self.0)
    }

    /// Parse a table cell such as `"3"` or `"3.0"`.
    fn parse_cell(cell: &str) -> std::result::Result<Self, String> {
        let cell = cell.trim();
        let value = match cell.parse::<i64>() {
            Ok(v) => v,
            Err(_) => match cell.parse::<f64>() {
                Ok(f) if f.fract() == 0.0 => f as i64,
                _ => return Err(format!("level {:?} is not an integer", cell)),
            },
        };
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| format!("level {} is outside 1-6", value))
    }
}

impl fmt::Display for HskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// VocabularyRow
// ---------------------------------------------------------------------------

/// Raw level cell: accepts numbers (JSON, inferred CSV) and strings alike.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelCell(pub String);

impl<'de> Deserialize<'de> for LevelCell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CellVisitor;

        impl Visitor<'_> for CellVisitor {
            type Value = LevelCell;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an HSK level number or string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<LevelCell, E> {
                Ok(LevelCell(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<LevelCell, E> {
                Ok(LevelCell(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<LevelCell, E> {
                Ok(LevelCell(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<LevelCell, E> {
                Ok(LevelCell(v.to_string()))
            }
        }

        deserializer.deserialize_any(CellVisitor)
    }
}

/// One row of the vocabulary table. Every column is optional at this layer;
/// [`IndexBuilder::build`] decides what is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VocabularyRow {
    pub level: Option<LevelCell>,
    pub hanzi: Option<String>,
    pub pinyin: Option<String>,
    pub pinyin_tone: Option<String>,
    pub pinyin_num: Option<String>,
    pub english: Option<String>,
    pub pos: Option<String>,
    pub tts_url: Option<String>,
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl VocabularyRow {
    /// Romanization column for `style`; diacritic style falls back to the
    /// generic `pinyin` column.
    fn romanization(&self, style: RomanizationStyle) -> Option<&str> {
        match style {
            RomanizationStyle::Tone => non_blank(&self.pinyin_tone).or(non_blank(&self.pinyin)),
            RomanizationStyle::Numeric => non_blank(&self.pinyin_num),
        }
    }
}

// ---------------------------------------------------------------------------
// Row sources
// ---------------------------------------------------------------------------

/// Parse CSV rows. Record-level decode errors are kept per row.
pub fn read_csv<R: Read>(reader: R) -> Vec<Result<VocabularyRow>> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize::<VocabularyRow>()
        .map(|r| r.map_err(C2pError::from))
        .collect()
}

/// Parse a JSON array of row objects.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Result<VocabularyRow>>> {
    let values: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
    Ok(values
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(C2pError::from))
        .collect())
}

/// Read a vocabulary table, choosing the format from the file extension
/// (`.json` is JSON, anything else is CSV).
pub fn read_rows(path: &Path) -> Result<Vec<Result<VocabularyRow>>> {
    let file = std::fs::File::open(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        read_json(file)
    } else {
        Ok(read_csv(file))
    }
}

// ---------------------------------------------------------------------------
// VocabularyEntry
// ---------------------------------------------------------------------------

/// Markup-ready metadata for one Hanzi word or character.
///
/// `pos`, `english`, `audio` and `tip` are already escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyEntry {
    pub hanzi: String,
    pub level: HskLevel,
    pub level_label: String,
    /// Syllables concatenated without separators, e.g. `nǐhǎo`.
    pub pinyin_plain: String,
    /// Each syllable wrapped in its tone color.
    pub pinyin_colored: String,
    pub pos: String,
    pub english: String,
    /// Hyperlinked speaker icon, or empty.
    pub audio: String,
    /// Tooltip text: level, pinyin, part of speech and translation.
    pub tip: String,
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

const TIP_SEPARATOR: &str = ",\t ";

impl VocabularyEntry {
    fn from_row(row: &VocabularyRow, config: &FormatConfig) -> std::result::Result<Self, String> {
        let hanzi = non_blank(&row.hanzi).ok_or("missing hanzi")?.to_string();
        let level = match &row.level {
            Some(cell) => HskLevel::parse_cell(&cell.0)?,
            None => return Err("missing level".to_string()),
        };

        let syllables: Vec<&str> = row
            .romanization(config.romanization)
            .map(|p| p.split_whitespace().collect())
            .unwrap_or_default();
        let pinyin_plain = syllables.concat();
        let pinyin_colored: String = syllables
            .iter()
            .map(|s| markup::syllable(config.tone_color(classify(s)), s))
            .collect();

        let english = markup::escape(&capitalize(non_blank(&row.english).unwrap_or("")));
        let pos = markup::escape(non_blank(&row.pos).unwrap_or(""));
        let audio = non_blank(&row.tts_url)
            .map(markup::audio_link)
            .unwrap_or_default();
        let level_label = level.label();

        let escaped_pinyin = markup::escape(&pinyin_plain);
        let tip = [level_label.as_str(), escaped_pinyin.as_str(), pos.as_str(), english.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<&str>>()
            .join(TIP_SEPARATOR);

        Ok(Self {
            hanzi,
            level,
            level_label,
            pinyin_plain,
            pinyin_colored,
            pos,
            english,
            audio,
            tip,
        })
    }
}

// ---------------------------------------------------------------------------
// VocabularyIndex
// ---------------------------------------------------------------------------

/// Read-only mapping from Hanzi to its vocabulary entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyIndex {
    entries: BTreeMap<String, VocabularyEntry>,
}

impl VocabularyIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, hanzi: &str) -> Option<&VocabularyEntry> {
        self.entries.get(hanzi)
    }

    pub fn contains(&self, hanzi: &str) -> bool {
        self.entries.contains_key(hanzi)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// SHA-256 over all entries in key order.
    ///
    /// Two indexes built from the same table have equal fingerprints.
    pub fn fingerprint(&self) -> String {
        digest_lines(
            self.entries
                .values()
                .map(|entry| serde_json::to_string(entry).unwrap_or_default()),
        )
    }
}

// ---------------------------------------------------------------------------
// IndexBuilder
// ---------------------------------------------------------------------------

/// Outcome of an index build besides the index itself.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Rows skipped, each a [`C2pError::MalformedInputRow`].
    pub rejected: Vec<C2pError>,
    /// Rows whose key was already present.
    pub duplicates: usize,
    /// Rows dropped by the level filter.
    pub filtered: usize,
}

/// Builds a [`VocabularyIndex`] under a [`FormatConfig`].
pub struct IndexBuilder<'a> {
    config: &'a FormatConfig,
    levels: Option<BTreeSet<HskLevel>>,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(config: &'a FormatConfig) -> Self {
        Self {
            config,
            levels: None,
        }
    }

    /// Keep only rows whose level is in `levels`. An empty set keeps all.
    pub fn with_levels(mut self, levels: impl IntoIterator<Item = HskLevel>) -> Self {
        let set: BTreeSet<HskLevel> = levels.into_iter().collect();
        self.levels = (!set.is_empty()).then_some(set);
        self
    }

    /// Index `rows`. Row numbers in the report are 1-based data rows.
    pub fn build<I>(&self, rows: I) -> (VocabularyIndex, BuildReport)
    where
        I: IntoIterator<Item = Result<VocabularyRow>>,
    {
        let mut index = VocabularyIndex::empty();
        let mut report = BuildReport::default();

        for (i, row) in rows.into_iter().enumerate() {
            let row_no = i + 1;
            let entry = row
                .map_err(|e| e.to_string())
                .and_then(|r| VocabularyEntry::from_row(&r, self.config));
            let entry = match entry {
                Ok(entry) => entry,
                Err(reason) => {
                    tracing::warn!(row = row_no, %reason, "skipping vocabulary row");
                    report.rejected.push(C2pError::MalformedInputRow { row: row_no, reason });
                    continue;
                }
            };

            if let Some(levels) = &self.levels {
                if !levels.contains(&entry.level) {
                    report.filtered += 1;
                    continue;
                }
            }

            if index.entries.contains_key(&entry.hanzi) {
                report.duplicates += 1;
                tracing::debug!(row = row_no, hanzi = %entry.hanzi, "duplicate vocabulary key");
                if self.config.duplicate_policy == DuplicatePolicy::FirstWins {
                    continue;
                }
            }
            index.entries.insert(entry.hanzi.clone(), entry);
        }

        tracing::debug!(
            entries = index.len(),
            rejected = report.rejected.len(),
            duplicates = report.duplicates,
            filtered = report.filtered,
            "built vocabulary index"
        );
        (index, report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn row(level: &str, hanzi: &str, pinyin: &str, english: &str, pos: &str) -> Result<VocabularyRow> {
        Ok(VocabularyRow {
            level: Some(LevelCell(level.to_string())),
            hanzi: Some(hanzi.to_string()),
            pinyin_tone: Some(pinyin.to_string()),
            english: Some(english.to_string()),
            pos: Some(pos.to_string()),
            ..Default::default()
        })
    }

    const CSV: &str = "\
level,hanzi,pinyin,pinyin_tone,pinyin_num,english,pos,tts_url
1,你好,ni hao,nǐ hǎo,ni3 hao3,HELLO,interj,https://a.test/nihao.mp3
1,爱,ai,ài,ai4,to love,v,
2,世界,shi jie,shì jiè,shi4 jie4,world,n,
";

    #[test]
    fn builds_entry_fields() {
        let cfg = FormatConfig::default();
        let (index, report) = IndexBuilder::new(&cfg).build(read_csv(CSV.as_bytes()));
        assert!(report.rejected.is_empty());
        assert_eq!(index.len(), 3);

        let e = index.get("你好").unwrap();
        assert_eq!(e.level.get(), 1);
        assert_eq!(e.level_label, "HSK 1");
        assert_eq!(e.pinyin_plain, "nǐhǎo");
        assert_eq!(e.pinyin_colored, "\\pysyl{blue}{nǐ}\\pysyl{blue}{hǎo}");
        assert_eq!(e.english, "Hello");
        assert_eq!(e.pos, "interj");
        assert_eq!(e.audio, "\\href{https://a.test/nihao.mp3}{\\faVolumeUp}");
        assert_eq!(e.tip, "HSK 1,\t nǐhǎo,\t interj,\t Hello");
    }

    #[test]
    fn tip_omits_empty_fields() {
        let cfg = FormatConfig::default();
        let (index, _) = IndexBuilder::new(&cfg).build(vec![row("3", "猫", "māo", "", "")]);
        assert_eq!(index.get("猫").unwrap().tip, "HSK 3,\t māo");
        assert_eq!(index.get("猫").unwrap().audio, "");
    }

    #[test]
    fn numeric_style_reads_pinyin_num() {
        let cfg = FormatConfig {
            romanization: RomanizationStyle::Numeric,
            ..FormatConfig::default()
        };
        let (index, _) = IndexBuilder::new(&cfg).build(read_csv(CSV.as_bytes()));
        let e = index.get("世界").unwrap();
        assert_eq!(e.pinyin_plain, "shi4jie4");
        assert_eq!(e.pinyin_colored, "\\pysyl{orange}{shi4}\\pysyl{orange}{jie4}");
    }

    #[test]
    fn tone_style_falls_back_to_pinyin_column() {
        let cfg = FormatConfig::default();
        let rows = vec![Ok(VocabularyRow {
            level: Some(LevelCell("1".into())),
            hanzi: Some("好".into()),
            pinyin: Some("hǎo".into()),
            ..Default::default()
        })];
        let (index, _) = IndexBuilder::new(&cfg).build(rows);
        assert_eq!(index.get("好").unwrap().pinyin_plain, "hǎo");
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let cfg = FormatConfig::default();
        let csv = "level,hanzi,pinyin_tone,english,pos\n\
                   1,,nǐ,you,r\n\
                   7,大,dà,big,a\n\
                   x,小,xiǎo,small,a\n\
                   ,中,zhōng,middle,n\n\
                   2,人,rén,person,n\n";
        let (index, report) = IndexBuilder::new(&cfg).build(read_csv(csv.as_bytes()));
        assert_eq!(index.len(), 1);
        assert!(index.contains("人"));
        assert_eq!(report.rejected.len(), 4);
        let rows: Vec<usize> = report
            .rejected
            .iter()
            .map(|e| match e {
                C2pError::MalformedInputRow { row, .. } => *row,
                other => panic!("unexpected error {:?}", other),
            })
            .collect();
        assert_eq!(rows, vec![1, 2, 3, 4]);
    }

    #[test]
    fn float_levels_accepted() {
        assert_eq!(HskLevel::parse_cell("3.0").unwrap().get(), 3);
        assert!(HskLevel::parse_cell("3.5").is_err());
        assert!(HskLevel::parse_cell("0").is_err());
    }

    #[test]
    fn first_wins_by_default() {
        let cfg = FormatConfig::default();
        let rows = vec![row("1", "会", "huì", "can", "aux"), row("3", "会", "huì", "meeting", "n")];
        let (index, report) = IndexBuilder::new(&cfg).build(rows);
        assert_eq!(report.duplicates, 1);
        assert_eq!(index.get("会").unwrap().english, "Can");
    }

    #[test]
    fn last_wins_when_configured() {
        let cfg = FormatConfig {
            duplicate_policy: DuplicatePolicy::LastWins,
            ..FormatConfig::default()
        };
        let rows = vec![row("1", "会", "huì", "can", "aux"), row("3", "会", "huì", "meeting", "n")];
        let (index, _) = IndexBuilder::new(&cfg).build(rows);
        assert_eq!(index.get("会").unwrap().english, "Meeting");
        assert_eq!(index.get("会").unwrap().level.get(), 3);
    }

    #[test]
    fn level_filter() {
        let cfg = FormatConfig::default();
        let (index, report) = IndexBuilder::new(&cfg)
            .with_levels([HskLevel::new(2).unwrap()])
            .build(read_csv(CSV.as_bytes()));
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["世界"]);
        assert_eq!(report.filtered, 2);
    }

    #[test]
    fn empty_level_filter_keeps_everything() {
        let cfg = FormatConfig::default();
        let (index, _) = IndexBuilder::new(&cfg)
            .with_levels(Vec::new())
            .build(read_csv(CSV.as_bytes()));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn building_twice_is_identical() {
        let cfg = FormatConfig::default();
        let (a, _) = IndexBuilder::new(&cfg).build(read_csv(CSV.as_bytes()));
        let (b, _) = IndexBuilder::new(&cfg).build(read_csv(CSV.as_bytes()));
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), VocabularyIndex::empty().fingerprint());
    }

    #[test]
    fn empty_table_gives_empty_index() {
        let cfg = FormatConfig::default();
        let (index, report) = IndexBuilder::new(&cfg).build(read_csv("level,hanzi\n".as_bytes()));
        assert!(index.is_empty());
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn english_and_pos_are_escaped() {
        let cfg = FormatConfig::default();
        let (index, _) = IndexBuilder::new(&cfg).build(vec![row("4", "百分", "bǎifēn", "50% off & more", "n_x")]);
        let e = index.get("百分").unwrap();
        assert_eq!(e.english, "50\\% off \\& more");
        assert_eq!(e.pos, "n\\_x");
    }

    #[test]
    fn json_rows_with_numeric_levels() {
        let json = r#"[
            {"level": 1, "hanzi": "你", "pinyin_tone": "nǐ", "english": "you", "pos": "r", "tts_url": null},
            {"level": "2", "hanzi": "世"}
        ]"#;
        let cfg = FormatConfig::default();
        let rows = read_json(json.as_bytes()).unwrap();
        let (index, report) = IndexBuilder::new(&cfg).build(rows);
        assert!(report.rejected.is_empty());
        assert_eq!(index.get("你").unwrap().level.get(), 1);
        assert_eq!(index.get("世").unwrap().level.get(), 2);
    }

    #[test]
    fn read_rows_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("hsk.csv");
        std::fs::write(&csv_path, CSV).unwrap();
        let json_path = dir.path().join("hsk.json");
        std::fs::write(&json_path, r#"[{"level": 5, "hanzi": "龙"}]"#).unwrap();

        let cfg = FormatConfig::default();
        let (csv_index, _) = IndexBuilder::new(&cfg).build(read_rows(&csv_path).unwrap());
        let (json_index, _) = IndexBuilder::new(&cfg).build(read_rows(&json_path).unwrap());
        assert_eq!(csv_index.len(), 3);
        assert_eq!(json_index.get("龙").unwrap().level.get(), 5);
    }

    #[test]
    fn capitalize_like_title_case_first_word() {
        assert_eq!(capitalize("hELLO world"), "Hello world");
        assert_eq!(capitalize(""), "");
    }
}
