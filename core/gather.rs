use crate::error::{AppError, Result};
use crate::matcher;
use crate::pattern::{Pattern, PatternStyle};
use log;
#[cfg(feature = "serde_support")]
use serde::Serialize;
use std::collections::HashSet;
use std::collections::hash_set;
use std::path::{Path, PathBuf};

/// Deduplicated set of matched file paths, keyed by exact string form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize))]
#[cfg_attr(feature = "serde_support", serde(transparent))]
pub struct MatchedFileSet {
    paths: HashSet<String>,
}

impl MatchedFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.paths.insert(path.into())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn retain(&mut self, keep: impl FnMut(&String) -> bool) {
        self.paths.retain(keep);
    }

    /// Paths in ascending lexicographic order.
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut sorted: Vec<String> = self.paths.iter().cloned().collect();
        sorted.sort();
        sorted
    }
}

impl FromIterator<String> for MatchedFileSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

impl Extend<String> for MatchedFileSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.paths.extend(iter);
    }
}

impl IntoIterator for MatchedFileSet {
    type Item = String;
    type IntoIter = hash_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

/// How many files one include pattern contributed, before deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize))]
pub struct PatternMatches {
    pub pattern: Pattern,
    pub matched: usize,
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize))]
pub struct Aggregation {
    pub files: MatchedFileSet,
    pub patterns: Vec<PatternMatches>,
}

/// Dispatch one classified pattern to its matcher.
pub fn match_pattern(root: &Path, pattern: &Pattern) -> Result<Vec<String>> {
    log::debug!("Resolving pattern '{}' as {}", pattern, pattern.style());
    match pattern.style() {
        PatternStyle::RecursiveWildcard => matcher::match_recursive(root, pattern.raw()),
        PatternStyle::PrefixFilter => matcher::match_prefix(root, pattern.raw()),
        PatternStyle::PlainGlob => matcher::match_plain(root, pattern.raw()),
    }
}

/// Union of all include pattern matches.
///
/// Every pattern is attempted in order; a pattern matching nothing does not
/// stop the others. Fails with [`AppError::NoFilesMatched`] only when the
/// final union is empty and at least one pattern was given.
pub fn aggregate(root: &Path, includes: &[String]) -> Result<Aggregation> {
    let mut aggregation = Aggregation::default();
    if includes.is_empty() {
        log::debug!("No include patterns given.");
        return Ok(aggregation);
    }

    for raw in includes {
        let pattern = Pattern::new(raw.as_str());
        let matched = match_pattern(root, &pattern)?;
        log::debug!("Pattern '{}' matched {} files", pattern, matched.len());
        aggregation.patterns.push(PatternMatches {
            matched: matched.len(),
            pattern,
        });
        aggregation.files.extend(matched);
    }

    if aggregation.files.is_empty() {
        log::error!("None of {} include patterns matched any file", includes.len());
        return Err(AppError::NoFilesMatched);
    }
    log::info!(
        "Aggregated {} unique files from {} patterns",
        aggregation.files.len(),
        includes.len()
    );
    Ok(aggregation)
}

/// `path` re-rooted relative to `root`; `None` when no relative form exists.
pub(crate) fn relative_to_root(root: &Path, path: &str) -> Option<PathBuf> {
    let path = Path::new(path);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    pathdiff::diff_paths(absolute, root)
}
