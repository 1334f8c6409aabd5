//! Line-oriented model of a Gradle build script
//!
//! The script is never parsed as Groovy. It is a list of lines, each keeping
//! its own terminator, so an untouched document renders back byte for byte.

use std::fmt;

/// Terminator that ended a line in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
    /// Final line without a terminator
    None,
}

impl LineEnding {
    /// Text of the terminator
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::None => "",
        }
    }
}

/// A single line of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line content without its terminator
    pub text: String,
    /// How the line ended
    pub ending: LineEnding,
}

impl Line {
    fn new(text: impl Into<String>, ending: LineEnding) -> Self {
        Self {
            text: text.into(),
            ending,
        }
    }
}

/// A build script held as an ordered list of lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradleDocument {
    lines: Vec<Line>,
}

impl GradleDocument {
    /// Split text into lines, remembering each terminator
    pub fn parse(contents: &str) -> Self {
        let lines = contents
            .split_inclusive('\n')
            .map(|raw| {
                if let Some(text) = raw.strip_suffix("\r\n") {
                    Line::new(text, LineEnding::CrLf)
                } else if let Some(text) = raw.strip_suffix('\n') {
                    Line::new(text, LineEnding::Lf)
                } else {
                    Line::new(raw, LineEnding::None)
                }
            })
            .collect();

        Self { lines }
    }

    /// Join the lines back into text
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            out.push_str(line.ending.as_str());
        }
        out
    }

    /// All lines in order
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines at all
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Terminator used by the first terminated line, `\n` if there is none
    pub fn line_ending(&self) -> LineEnding {
        self.lines
            .iter()
            .map(|line| line.ending)
            .find(|ending| *ending != LineEnding::None)
            .unwrap_or(LineEnding::Lf)
    }

    /// Insert `new_lines` directly after the line at `index`.
    ///
    /// Inserted lines take the anchor line's terminator. When the anchor is an
    /// unterminated final line it gains the document's terminator and the last
    /// inserted line becomes the unterminated one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn insert_after(&mut self, index: usize, new_lines: Vec<String>) {
        if new_lines.is_empty() {
            return;
        }

        let anchor_ending = self.lines[index].ending;
        let ending = match anchor_ending {
            LineEnding::None => self.line_ending(),
            other => other,
        };
        self.lines[index].ending = ending;

        let count = new_lines.len();
        let inserted = new_lines.into_iter().enumerate().map(|(i, text)| {
            if i + 1 == count && anchor_ending == LineEnding::None {
                Line::new(text, LineEnding::None)
            } else {
                Line::new(text, ending)
            }
        });

        self.lines.splice(index + 1..index + 1, inserted);
    }

    /// Index of the first line containing `needle`
    pub fn first_line_containing(&self, needle: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.text.contains(needle))
    }

    /// Number of lines containing `needle`
    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines
            .iter()
            .filter(|line| line.text.contains(needle))
            .count()
    }

    /// Number of non-overlapping occurrences of `needle` in the whole text
    pub fn occurrences(&self, needle: &str) -> usize {
        self.lines
            .iter()
            .map(|line| line.text.matches(needle).count())
            .sum()
    }

    /// Drop every line containing `needle`, terminator included.
    ///
    /// If the unterminated final line is dropped, the new final line gives up
    /// its terminator, so removing lines appended at the end of a file without
    /// a trailing newline restores that shape.
    pub fn remove_containing(&mut self, needle: &str) -> usize {
        let drops_unterminated_tail = self
            .lines
            .last()
            .is_some_and(|line| line.ending == LineEnding::None && line.text.contains(needle));

        let before = self.lines.len();
        self.lines.retain(|line| !line.text.contains(needle));
        let removed = before - self.lines.len();

        if drops_unterminated_tail {
            if let Some(last) = self.lines.last_mut() {
                last.ending = LineEnding::None;
            }
        }

        removed
    }
}

impl fmt::Display for GradleDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_preserves_bytes() {
        for input in [
            "",
            "a",
            "a\n",
            "a\nb",
            "a\r\nb\r\n",
            "mixed\r\nendings\nhere",
            "\n\n",
        ] {
            assert_eq!(GradleDocument::parse(input).render(), input);
        }
    }

    #[test]
    fn test_parse_tracks_endings() {
        let doc = GradleDocument::parse("one\r\ntwo\nthree");
        let endings: Vec<_> = doc.lines().iter().map(|l| l.ending).collect();
        assert_eq!(
            endings,
            vec![LineEnding::CrLf, LineEnding::Lf, LineEnding::None]
        );
        assert_eq!(doc.lines()[0].text, "one");
    }

    #[test]
    fn test_insert_after_middle_line() {
        let mut doc = GradleDocument::parse("a\nb\nc\n");
        doc.insert_after(1, vec!["x".into(), "y".into()]);
        assert_eq!(doc.render(), "a\nb\nx\ny\nc\n");
    }

    #[test]
    fn test_insert_after_keeps_crlf() {
        let mut doc = GradleDocument::parse("a\r\nb\r\n");
        doc.insert_after(0, vec!["x".into()]);
        assert_eq!(doc.render(), "a\r\nx\r\nb\r\n");
    }

    #[test]
    fn test_insert_after_unterminated_last_line() {
        let mut doc = GradleDocument::parse("a\r\nb");
        doc.insert_after(1, vec!["x".into(), "y".into()]);
        assert_eq!(doc.render(), "a\r\nb\r\nx\r\ny");
    }

    #[test]
    fn test_insert_nothing_is_noop() {
        let mut doc = GradleDocument::parse("a");
        doc.insert_after(0, Vec::new());
        assert_eq!(doc.render(), "a");
    }

    #[test]
    fn test_remove_containing() {
        let mut doc = GradleDocument::parse("keep\ndrop me\nkeep too\ndrop\n");
        assert_eq!(doc.remove_containing("drop"), 2);
        assert_eq!(doc.render(), "keep\nkeep too\n");
    }

    #[test]
    fn test_remove_unterminated_tail() {
        let mut doc = GradleDocument::parse("keep\ndrop 1\ndrop 2");
        assert_eq!(doc.remove_containing("drop"), 2);
        assert_eq!(doc.render(), "keep");
    }

    #[test]
    fn test_remove_nothing_leaves_text() {
        let input = "a\r\nb\nc";
        let mut doc = GradleDocument::parse(input);
        assert_eq!(doc.remove_containing("zzz"), 0);
        assert_eq!(doc.render(), input);
    }

    #[test]
    fn test_occurrences_and_lookup() {
        let doc = GradleDocument::parse("allprojects\nfoo allprojects allprojects\n");
        assert_eq!(doc.occurrences("allprojects"), 3);
        assert_eq!(doc.count_containing("allprojects"), 2);
        assert_eq!(doc.first_line_containing("foo"), Some(1));
        assert_eq!(doc.first_line_containing("bar"), None);
    }
}
