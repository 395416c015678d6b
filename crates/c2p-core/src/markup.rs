//! LaTeX markup primitives shared by the index builder and the renderers.
//!
//! Every function returns a self-contained fragment; user-supplied text must
//! go through [`escape`] (or [`escape_url`] for link targets) first.

/// Separator placed between units in romanization-only output.
pub const WORD_SEPARATOR: &str = "\\pywordsep{}";

/// Separator placed between rendered paragraphs.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Escape the LaTeX special characters of `text`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '$' => out.push_str("\\$"),
            '&' => out.push_str("\\&"),
            '#' => out.push_str("\\#"),
            '%' => out.push_str("\\%"),
            '_' => out.push_str("\\_"),
            '^' => out.push_str("\\textasciicircum{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            other => out.push(other),
        }
    }
    out
}

/// Escape a URL for the first argument of `\href`.
///
/// hyperref reads the target verbatim except for `%`, `#`, `\` and braces.
pub fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for ch in url.chars() {
        match ch {
            '%' | '#' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            '\\' => out.push_str("%5C"),
            other => out.push(other),
        }
    }
    out
}

/// A syllable drawn in its tone color.
pub fn syllable(color: &str, syl: &str) -> String {
    format!("\\pysyl{{{}}}{{{}}}", color, escape(syl))
}

/// Boxed background highlight with no padding.
pub fn highlight(text: &str, color: &str) -> String {
    format!(
        "\\begingroup\\setlength{{\\fboxsep}}{{0pt}}\\colorbox{{{}}}{{{}}}\\endgroup",
        color, text
    )
}

/// PDF tooltip around already-rendered `visible` markup.
pub fn tooltip(visible: &str, tip: &str) -> String {
    format!("\\pdftooltip{{{}}}{{{}}}", visible, tip)
}

/// Interlinear annotation of `base` with `annotation` (may be empty).
pub fn ruby(base: &str, annotation: &str) -> String {
    format!("\\ruby{{{}}}{{{}}}", base, annotation)
}

/// Speaker icon linking to an audio file.
pub fn audio_link(url: &str) -> String {
    format!("\\href{{{}}}{{\\faVolumeUp}}", escape_url(url))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_specials() {
        assert_eq!(escape("50% & $5"), "50\\% \\& \\$5");
        assert_eq!(escape("a_b#c"), "a\\_b\\#c");
        assert_eq!(escape("{x}"), "\\{x\\}");
        assert_eq!(escape("\\"), "\\textbackslash{}");
        assert_eq!(escape("~^"), "\\textasciitilde{}\\textasciicircum{}");
    }

    #[test]
    fn escape_leaves_cjk_and_latin() {
        assert_eq!(escape("你好 ABC, it's"), "你好 ABC, it's");
    }

    #[test]
    fn url_escaping() {
        assert_eq!(
            escape_url("https://x.test/a%20b#frag"),
            "https://x.test/a\\%20b\\#frag"
        );
    }

    #[test]
    fn macro_shapes() {
        assert_eq!(syllable("blue", "nǐ"), "\\pysyl{blue}{nǐ}");
        assert_eq!(ruby("你", ""), "\\ruby{你}{}");
        assert_eq!(tooltip("V", "T"), "\\pdftooltip{V}{T}");
        assert_eq!(
            highlight("你", "green!20"),
            "\\begingroup\\setlength{\\fboxsep}{0pt}\\colorbox{green!20}{你}\\endgroup"
        );
        assert_eq!(
            audio_link("https://a.test/x.mp3"),
            "\\href{https://a.test/x.mp3}{\\faVolumeUp}"
        );
    }
}
