//! Anchor patterns locating insertion points in the root build script

use crate::build_gradle::GradleDocument;
use crashlytics_core::error::{Error, ErrorCode, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Keyword opening the per-project section of the root build script
pub const SECTION_KEYWORD: &str = "allprojects";

/// Name of the capture group holding a line's leading indentation
const INDENT_GROUP: &str = "indent";

/// `classpath 'com.android.tools.build:gradle:x.y.z'` in the buildscript block
pub static BUILD_TOOLS_CLASSPATH: Lazy<AnchorPattern> = Lazy::new(|| {
    AnchorPattern::new(
        "classpath com.android.tools.build",
        r#"^(?P<indent>[ \t]*)classpath ["']com\.android\.tools\.build"#,
    )
    .unwrap()
});

/// `repositories repos` line applying the shared repository closure
pub static REPOSITORIES_REPOS: Lazy<AnchorPattern> = Lazy::new(|| {
    AnchorPattern::new(
        "repositories repos",
        r"^(?P<indent>[ \t]*)repositories repos",
    )
    .unwrap()
});

/// A compiled pattern matching a line from its start
#[derive(Debug, Clone)]
pub struct AnchorPattern {
    name: &'static str,
    regex: Regex,
}

/// Where an anchor matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorMatch {
    /// Index of the matching line
    pub line: usize,
    /// Leading whitespace of that line
    pub indent: String,
}

impl AnchorPattern {
    /// Compile an anchor. The pattern must define an `indent` group.
    pub fn new(name: &'static str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        if !regex.capture_names().flatten().any(|n| n == INDENT_GROUP) {
            return Err(Error::new(
                ErrorCode::InvalidPattern,
                format!("Anchor `{}` has no `{}` capture group", name, INDENT_GROUP),
            ));
        }
        Ok(Self { name, regex })
    }

    /// Human-readable name used in errors and logs
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Indentation of `line` if the anchor matches it
    pub fn indent_of<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.name(INDENT_GROUP))
            .map(|m| m.as_str())
    }

    /// First matching line at or after `from`
    pub fn find(&self, doc: &GradleDocument, from: usize) -> Option<AnchorMatch> {
        doc.lines()
            .iter()
            .enumerate()
            .skip(from)
            .find_map(|(index, line)| {
                self.indent_of(&line.text).map(|indent| AnchorMatch {
                    line: index,
                    indent: indent.to_string(),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tools_anchor_quotes() {
        assert_eq!(
            BUILD_TOOLS_CLASSPATH.indent_of("  classpath \"com.android.tools.build:gradle:3.4.1\""),
            Some("  ")
        );
        assert_eq!(
            BUILD_TOOLS_CLASSPATH.indent_of("\tclasspath 'com.android.tools.build:gradle:3.3.0'"),
            Some("\t")
        );
    }

    #[test]
    fn test_build_tools_anchor_rejects_other_classpaths() {
        assert!(BUILD_TOOLS_CLASSPATH
            .indent_of("classpath 'com.google.gms:google-services:4.3.3'")
            .is_none());
        assert!(BUILD_TOOLS_CLASSPATH
            .indent_of("// classpath 'com.android.tools.build:gradle:3.3.0'")
            .is_none());
    }

    #[test]
    fn test_repositories_anchor() {
        assert_eq!(REPOSITORIES_REPOS.indent_of("    repositories repos"), Some("    "));
        assert!(REPOSITORIES_REPOS.indent_of("    repositories {").is_none());
    }

    #[test]
    fn test_find_from_offset() {
        let doc = GradleDocument::parse(
            "  repositories repos\nallprojects {\n    repositories repos\n}\n",
        );
        let first = REPOSITORIES_REPOS.find(&doc, 0).unwrap();
        assert_eq!(first.line, 0);
        assert_eq!(first.indent, "  ");

        let second = REPOSITORIES_REPOS.find(&doc, 1).unwrap();
        assert_eq!(second.line, 2);
        assert_eq!(second.indent, "    ");

        assert!(REPOSITORIES_REPOS.find(&doc, 3).is_none());
    }

    #[test]
    fn test_pattern_without_indent_group() {
        let err = AnchorPattern::new("bad", r"^repositories").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPattern);
    }

    #[test]
    fn test_invalid_regex() {
        let err = AnchorPattern::new("broken", r"^(?P<indent>[ \t]*").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPattern);
    }
}
