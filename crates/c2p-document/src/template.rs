//! LaTeX template substitution.
//!
//! Placeholders are written `<<NAME>>`. Substitution is a single left-to-right
//! pass, so placeholder-like text inside the rendered bodies is never
//! expanded a second time.

use std::path::Path;

use c2p_core::markup;
use c2p_core::{C2pError, Result};
use c2p_render::RenderedBodies;

/// Built-in template with the `\pysyl`, `\pywordsep` and `\ruby` macros.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/document.tex");

const REQUIRED: [&str; 3] = ["HANZI", "RUBY", "PINYIN"];
const VOCABULARY: &str = "<<VOCABULARY>>";
const VOCABULARY_BEGIN: &str = "%% <<VOCABULARY-BEGIN>>";
const VOCABULARY_END: &str = "%% <<VOCABULARY-END>>";

#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn builtin() -> Self {
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Validate a custom template: the three body placeholders must be
    /// present and the vocabulary markers, if any, must come in order and
    /// enclose `<<VOCABULARY>>`.
    pub fn parse(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        for name in REQUIRED {
            if !source.contains(&format!("<<{}>>", name)) {
                return Err(C2pError::Template(format!("missing placeholder <<{}>>", name)));
            }
        }
        match (source.find(VOCABULARY_BEGIN), source.find(VOCABULARY_END)) {
            (None, None) => {}
            (Some(begin), Some(end)) if begin < end => {
                if !source[begin..end].contains(VOCABULARY) {
                    return Err(C2pError::Template(format!(
                        "vocabulary block has no {} placeholder",
                        VOCABULARY
                    )));
                }
            }
            _ => {
                return Err(C2pError::Template(
                    "vocabulary markers must appear as a begin/end pair".to_string(),
                ))
            }
        }
        Ok(Self { source })
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(std::fs::read_to_string(path)?)
    }

    /// Fill in the document. The vocabulary block is dropped when the
    /// vocabulary body is empty.
    pub fn fill(&self, title: &str, font: &str, bodies: &RenderedBodies) -> String {
        let source = if bodies.has_vocabulary() {
            if !self.source.contains(VOCABULARY) {
                tracing::warn!("template has no {} placeholder, vocabulary dropped", VOCABULARY);
            }
            self.source.clone()
        } else {
            strip_vocabulary_block(&self.source)
        };
        let title = markup::escape(title);
        substitute(
            &source,
            &[
                ("FONT", font),
                ("TITLE", &title),
                ("HANZI", &bodies.hanzi),
                ("RUBY", &bodies.ruby),
                ("PINYIN", &bodies.pinyin),
                ("VOCABULARY", &bodies.vocabulary),
            ],
        )
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::builtin()
    }
}

fn strip_vocabulary_block(source: &str) -> String {
    match (source.find(VOCABULARY_BEGIN), source.find(VOCABULARY_END)) {
        (Some(begin), Some(end)) if begin < end => {
            let tail = &source[end + VOCABULARY_END.len()..];
            let tail = tail.strip_prefix('\n').unwrap_or(tail);
            format!("{}{}", &source[..begin], tail)
        }
        _ => source.to_string(),
    }
}

/// Replace every known `<<NAME>>` in one pass; unknown names are kept.
fn substitute(source: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find("<<") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let replaced = after.find(">>").and_then(|end| {
            let name = &after[..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });
        match replaced {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("<<");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
