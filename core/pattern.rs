//! Pattern classification.
//!
//! Every raw pattern string belongs to exactly one of three dialects. The
//! style is decided purely from the text, before anything touches the
//! filesystem, so the same function drives both inclusion and exclusion.

#[cfg(feature = "serde_support")]
use serde::Serialize;
use std::fmt;

/// Token that marks a recursive double-wildcard glob.
pub const RECURSIVE_TOKEN: &str = "**";
/// Marker separating a base directory from an optional recursive filter.
pub const PREFIX_MARKER: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize))]
#[cfg_attr(feature = "serde_support", serde(rename_all = "kebab-case"))]
pub enum PatternStyle {
    RecursiveWildcard,
    PrefixFilter,
    PlainGlob,
}

impl fmt::Display for PatternStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatternStyle::RecursiveWildcard => "recursive-wildcard",
            PatternStyle::PrefixFilter => "prefix-filter",
            PatternStyle::PlainGlob => "plain-glob",
        };
        f.write_str(name)
    }
}

/// Recursive token wins over the prefix marker; anything else is a plain glob.
pub fn classify(raw: &str) -> PatternStyle {
    if raw.contains(RECURSIVE_TOKEN) {
        PatternStyle::RecursiveWildcard
    } else if raw.contains(PREFIX_MARKER) {
        PatternStyle::PrefixFilter
    } else {
        PatternStyle::PlainGlob
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize))]
pub struct Pattern {
    raw: String,
    style: PatternStyle,
}

impl Pattern {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let style = classify(&raw);
        Self { raw, style }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn style(&self) -> PatternStyle {
        self.style
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// What a prefix-filter pattern keeps once its base directory is walked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixFilter {
    /// Nothing after the marker: every file under the base.
    All,
    /// `*.<ext>`, tested as a plain suffix `.<ext>` on the whole path.
    Extension(String),
    /// Anything else, matched against the file's base name.
    Basename(String),
}

/// A prefix-filter pattern split on the first marker occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixPattern {
    /// Text before the marker minus `.` segments (trailing slash included).
    pub base_path: String,
    pub filter: PrefixFilter,
}

impl PrefixPattern {
    pub fn parse(raw: &str) -> Self {
        let (base, rest) = raw.split_once(PREFIX_MARKER).unwrap_or((raw, ""));
        let rest = rest.strip_prefix('/').unwrap_or(rest);

        let filter = if rest.is_empty() {
            PrefixFilter::All
        } else if let Some(ext) = rest.strip_prefix("*.") {
            PrefixFilter::Extension(ext.to_string())
        } else {
            PrefixFilter::Basename(rest.to_string())
        };

        Self {
            base_path: strip_cur_dir(base),
            filter,
        }
    }
}

/// Drop `.` segments so `./src` and `src` name the same files, the way glob
/// expansion reports them.
pub(crate) fn strip_cur_dir(pattern: &str) -> String {
    pattern
        .split('/')
        .filter(|segment| *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recursive_token_takes_precedence() {
        assert_eq!(classify("src/**/*.rs"), PatternStyle::RecursiveWildcard);
        assert_eq!(classify("src/.../**/*.rs"), PatternStyle::RecursiveWildcard);
        assert_eq!(classify("**"), PatternStyle::RecursiveWildcard);
    }

    #[test]
    fn prefix_marker_without_double_star() {
        assert_eq!(classify("testdata/..."), PatternStyle::PrefixFilter);
        assert_eq!(classify("testdata/.../*.go"), PatternStyle::PrefixFilter);
    }

    #[test]
    fn everything_else_is_plain() {
        assert_eq!(classify("*.go"), PatternStyle::PlainGlob);
        assert_eq!(classify(""), PatternStyle::PlainGlob);
        assert_eq!(classify("a/b.txt"), PatternStyle::PlainGlob);
        assert_eq!(classify(".."), PatternStyle::PlainGlob);
    }

    #[test]
    fn pattern_keeps_raw_text_and_style() {
        let p = Pattern::new("cmd/...");
        assert_eq!(p.raw(), "cmd/...");
        assert_eq!(p.style(), PatternStyle::PrefixFilter);
        assert_eq!(p.to_string(), "cmd/...");
    }

    #[test]
    fn decompose_without_filter() {
        let p = PrefixPattern::parse("testdata/...");
        assert_eq!(p.base_path, "testdata/");
        assert_eq!(p.filter, PrefixFilter::All);
    }

    #[test]
    fn decompose_extension_filter_with_and_without_slash() {
        let with_slash = PrefixPattern::parse("testdata/.../*.go");
        assert_eq!(with_slash.base_path, "testdata/");
        assert_eq!(with_slash.filter, PrefixFilter::Extension("go".into()));

        let without_slash = PrefixPattern::parse("testdata/...*.go");
        assert_eq!(without_slash.filter, PrefixFilter::Extension("go".into()));
    }

    #[test]
    fn decompose_basename_glob() {
        let p = PrefixPattern::parse("src/.../test_*");
        assert_eq!(p.filter, PrefixFilter::Basename("test_*".into()));
    }

    #[test]
    fn decompose_drops_current_dir_segments() {
        assert_eq!(PrefixPattern::parse("./src/...").base_path, "src/");
        assert_eq!(PrefixPattern::parse("src/./lib/.../*.rs").base_path, "src/lib/");
        assert_eq!(PrefixPattern::parse("./...").base_path, "");
    }

    #[test]
    fn strip_cur_dir_keeps_absolute_roots_and_wildcards() {
        assert_eq!(strip_cur_dir("./src/**/*.go"), "src/**/*.go");
        assert_eq!(strip_cur_dir("/abs/./x/**"), "/abs/x/**");
        assert_eq!(strip_cur_dir("../up/*.rs"), "../up/*.rs");
        assert_eq!(strip_cur_dir(".hidden/**"), ".hidden/**");
    }

    #[test]
    fn decompose_splits_on_first_marker_only() {
        let p = PrefixPattern::parse("a/.../b/.../c");
        assert_eq!(p.base_path, "a/");
        assert_eq!(p.filter, PrefixFilter::Basename("b/.../c".into()));
    }
}
