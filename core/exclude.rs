use crate::gather::{MatchedFileSet, relative_to_root};
use crate::matcher::{self, PLAIN_GLOB_OPTIONS};
use crate::pattern::{Pattern, PatternStyle, PrefixPattern};
use globset::GlobMatcher;
use indexmap::IndexMap;
use log;
#[cfg(feature = "serde_support")]
use serde::Serialize;
use std::path::Path;

/// Files removed per exclude pattern, in the order the patterns were given.
///
/// A file is credited to the first pattern that matched it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize))]
#[cfg_attr(feature = "serde_support", serde(transparent))]
pub struct ExclusionReport {
    removed: IndexMap<String, usize>,
}

impl ExclusionReport {
    pub fn removed_by(&self, pattern: &str) -> usize {
        self.removed.get(pattern).copied().unwrap_or(0)
    }

    pub fn total_removed(&self) -> usize {
        self.removed.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.removed.iter().map(|(pattern, count)| (pattern.as_str(), *count))
    }
}

enum ExcludeRule {
    /// Doublestar match against the root-relative path.
    Recursive(GlobMatcher),
    /// String-prefix test against the raw matched path.
    Prefix(String),
    /// Single-level glob against the base name of the root-relative path.
    Plain(glob::Pattern),
    /// Malformed pattern; never matches.
    Invalid,
}

struct ExcludePattern {
    raw: String,
    rule: ExcludeRule,
}

impl ExcludePattern {
    fn compile(raw: &str) -> Self {
        let pattern = Pattern::new(raw);
        let compiled = match pattern.style() {
            PatternStyle::RecursiveWildcard => {
                matcher::compile_recursive(raw).map(ExcludeRule::Recursive)
            }
            PatternStyle::PrefixFilter => {
                Ok(ExcludeRule::Prefix(PrefixPattern::parse(raw).base_path))
            }
            PatternStyle::PlainGlob => matcher::compile_plain(raw).map(ExcludeRule::Plain),
        };
        let rule = compiled.unwrap_or_else(|e| {
            log::warn!("Exclude pattern ignored, it matches nothing: {}", e);
            ExcludeRule::Invalid
        });
        Self {
            raw: raw.to_string(),
            rule,
        }
    }

    fn matches(&self, root: &Path, path: &str) -> bool {
        match &self.rule {
            ExcludeRule::Prefix(base) => path.starts_with(base.as_str()),
            ExcludeRule::Recursive(glob) => match relative_to_root(root, path) {
                Some(relative) => glob.is_match(relative),
                None => {
                    log::debug!("No root-relative form for '{}', not excluded", path);
                    false
                }
            },
            ExcludeRule::Plain(glob) => relative_to_root(root, path)
                .as_deref()
                .and_then(Path::file_name)
                .and_then(|name| name.to_str())
                .is_some_and(|name| glob.matches_with(name, PLAIN_GLOB_OPTIONS)),
            ExcludeRule::Invalid => false,
        }
    }
}

/// Drop every file matched by any exclude pattern.
///
/// An empty pattern list returns the input unchanged. Malformed patterns are
/// logged and treated as matching nothing.
pub fn apply_exclusions(
    root: &Path,
    mut files: MatchedFileSet,
    excludes: &[String],
) -> (MatchedFileSet, ExclusionReport) {
    let mut report = ExclusionReport::default();
    if excludes.is_empty() {
        return (files, report);
    }

    let patterns: Vec<ExcludePattern> = excludes
        .iter()
        .map(|raw| ExcludePattern::compile(raw))
        .collect();
    for pattern in &patterns {
        report.removed.entry(pattern.raw.clone()).or_insert(0);
    }

    files.retain(|path| {
        match patterns.iter().find(|pattern| pattern.matches(root, path)) {
            Some(pattern) => {
                log::trace!("Excluding '{}' (matched '{}')", path, pattern.raw);
                if let Some(count) = report.removed.get_mut(&pattern.raw) {
                    *count += 1;
                }
                false
            }
            None => true,
        }
    });

    for (pattern, count) in report.iter() {
        log::debug!("Exclude pattern '{}' removed {} files", pattern, count);
    }
    (files, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(paths: &[&str]) -> MatchedFileSet {
        paths.iter().map(|p| p.to_string()).collect()
    }

    fn excludes(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn empty_exclude_list_is_identity() {
        let files = set(&["a.go", "b/c.txt"]);
        let (kept, report) = apply_exclusions(Path::new("/r"), files.clone(), &[]);
        assert_eq!(kept, files);
        assert_eq!(report.total_removed(), 0);
    }

    #[test]
    fn recursive_exclude_matches_relative_path() {
        let files = set(&["a.go", "b/c.txt", "d.txt", "/r/e/f.txt"]);
        let (kept, report) =
            apply_exclusions(Path::new("/r"), files, &excludes(&["**/*.txt"]));
        assert_eq!(kept, set(&["a.go"]));
        assert_eq!(report.removed_by("**/*.txt"), 3);
    }

    #[test]
    fn plain_exclude_matches_base_name_only() {
        let files = set(&["src/main.go", "src/main_test.go", "lib/x_test.go"]);
        let (kept, _) =
            apply_exclusions(Path::new("/r"), files, &excludes(&["*_test.go", "src/*.go"]));
        // `src/*.go` is matched against base names, so it never fires.
        assert_eq!(kept, set(&["src/main.go"]));
    }

    #[test]
    fn prefix_exclude_is_a_raw_string_prefix_test() {
        let files = set(&["vendor/a.go", "vendored.go", "/r/vendor/b.go", "src/c.go"]);
        let (kept, report) =
            apply_exclusions(Path::new("/r"), files, &excludes(&["vendor..."]));
        // Raw prefix: `vendored.go` is caught, the absolute spelling is not.
        assert_eq!(kept, set(&["/r/vendor/b.go", "src/c.go"]));
        assert_eq!(report.removed_by("vendor..."), 2);
    }

    #[test]
    fn malformed_exclude_matches_nothing_and_others_still_apply() {
        let files = set(&["a.go", "b.txt"]);
        let (kept, report) =
            apply_exclusions(Path::new("/r"), files, &excludes(&["**/[bad", "*.txt"]));
        assert_eq!(kept, set(&["a.go"]));
        assert_eq!(report.removed_by("**/[bad"), 0);
        assert_eq!(report.removed_by("*.txt"), 1);
    }

    #[test]
    fn removal_is_credited_to_first_matching_pattern() {
        let files = set(&["x.txt"]);
        let (_, report) =
            apply_exclusions(Path::new("/r"), files, &excludes(&["*.txt", "**/*.txt"]));
        assert_eq!(report.removed_by("*.txt"), 1);
        assert_eq!(report.removed_by("**/*.txt"), 0);
        assert_eq!(report.total_removed(), 1);
    }

    #[test]
    fn filtering_twice_equals_filtering_once() {
        let files = set(&["a.go", "b/c.txt", "vendor/d.go", "e_test.go"]);
        let ex = excludes(&["**/*.txt", "vendor/...", "*_test.go"]);
        let (once, _) = apply_exclusions(Path::new("/r"), files, &ex);
        let (twice, report) = apply_exclusions(Path::new("/r"), once.clone(), &ex);
        assert_eq!(once, twice);
        assert_eq!(report.total_removed(), 0);
    }
}
