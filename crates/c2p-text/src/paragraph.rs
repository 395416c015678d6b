//! Paragraph splitting.
//!
//! Consecutive non-blank lines form one paragraph; each line is trimmed and
//! the lines are joined with a single space. One or more blank lines end a
//! paragraph.

/// Split `text` into paragraphs.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();

    for line in text.lines() {
        let clean = line.trim();
        if !clean.is_empty() {
            buffer.push(clean);
        } else if !buffer.is_empty() {
            paragraphs.push(buffer.join(" "));
            buffer.clear();
        }
    }
    if !buffer.is_empty() {
        paragraphs.push(buffer.join(" "));
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_blank_lines_gives_one_paragraph() {
        let paras = split_paragraphs("第一行\n第二行\nthird line");
        assert_eq!(paras, vec!["第一行 第二行 third line"]);
    }

    #[test]
    fn blank_lines_separate_groups() {
        let text = "甲\n乙\n\n丙\n\n\n  \n丁\n戊\n";
        let paras = split_paragraphs(text);
        assert_eq!(paras, vec!["甲 乙", "丙", "丁 戊"]);
    }

    #[test]
    fn lines_are_trimmed() {
        assert_eq!(split_paragraphs("  你好  \n\t世界\t"), vec!["你好 世界"]);
    }

    #[test]
    fn crlf_line_endings() {
        assert_eq!(split_paragraphs("a\r\nb\r\n\r\nc"), vec!["a b", "c"]);
    }

    #[test]
    fn empty_and_blank_text() {
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs("\n \n\t\n").is_empty());
    }
}
