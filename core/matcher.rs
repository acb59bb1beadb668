//! Filesystem matchers, one per pattern style.
//!
//! Each matcher is a pure function of `(root, pattern, filesystem)` returning
//! the matched file paths as strings. Relative patterns produce paths relative
//! to `root`; absolute patterns produce absolute paths.

use crate::error::{AppError, Result};
use crate::pattern::{PrefixFilter, PrefixPattern, strip_cur_dir};
use crate::walk::walk_files;
use glob::MatchOptions;
use globset::{GlobBuilder, GlobMatcher};
use log;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Single-level glob options: `*` never crosses `/`, dotfiles match.
pub(crate) const PLAIN_GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

const GLOB_META: [char; 5] = ['*', '?', '[', '{', '\\'];

pub(crate) fn compile_recursive(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(&strip_cur_dir(pattern))
        .literal_separator(true)
        .build()
        .map_err(|e| AppError::invalid_pattern(pattern, e.kind()))?;
    Ok(glob.compile_matcher())
}

pub(crate) fn compile_plain(pattern: &str) -> Result<glob::Pattern> {
    glob::Pattern::new(pattern).map_err(|e| AppError::invalid_pattern(pattern, e.msg))
}

pub(crate) fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

// Leading run of segments without glob metacharacters. Walking starts there
// instead of at the root; every match must begin with it anyway.
fn literal_base(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();
    if pattern.starts_with('/') {
        base.push("/");
    }
    let mut segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    // The final segment names files, never the directory to walk.
    segments.pop();
    for segment in segments {
        if segment.contains(GLOB_META) {
            break;
        }
        base.push(segment);
    }
    base
}

/// Double-wildcard glob across directory boundaries.
///
/// Matches that stat as directories are dropped. A stat failure on a match
/// is fatal; so is malformed pattern syntax.
pub fn match_recursive(root: &Path, pattern: &str) -> Result<Vec<String>> {
    let matcher = compile_recursive(pattern)?;
    let absolute = Path::new(pattern).is_absolute();
    let base = literal_base(&strip_cur_dir(pattern));
    let walk_root = if base.as_os_str().is_empty() {
        root.to_path_buf()
    } else {
        root.join(&base)
    };

    if !walk_root.is_dir() {
        log::info!("Pattern '{}' matched no files", pattern);
        return Ok(Vec::new());
    }
    let walk = match walk_files(&walk_root) {
        Ok(walk) => walk,
        Err(e) => {
            log::warn!("Pattern '{}': {}", pattern, e);
            return Ok(Vec::new());
        }
    };

    let mut matches = Vec::new();
    for file in walk {
        let candidate = if absolute {
            file.path.clone()
        } else {
            base.join(&file.relative_path)
        };
        if !matcher.is_match(&candidate) {
            continue;
        }
        let metadata = fs::metadata(root.join(&candidate)).map_err(|e| AppError::Stat {
            path: candidate.clone(),
            source: e,
        })?;
        if metadata.is_dir() {
            log::trace!("Dropping directory match: {}", candidate.display());
            continue;
        }
        log::trace!("Matched file: {}", candidate.display());
        matches.push(path_string(&candidate));
    }

    if matches.is_empty() {
        log::info!("Pattern '{}' matched no files", pattern);
    }
    Ok(matches)
}

/// `<base>/...[/filter]`: walk `base` recursively and keep what the filter
/// accepts. A missing or non-directory base contributes nothing.
pub fn match_prefix(root: &Path, pattern: &str) -> Result<Vec<String>> {
    let parsed = PrefixPattern::parse(pattern);
    let basename_glob = match &parsed.filter {
        PrefixFilter::Basename(glob) => Some(compile_plain(glob)?),
        _ => None,
    };

    let base_dir = if parsed.base_path.is_empty() {
        root.to_path_buf()
    } else {
        root.join(&parsed.base_path)
    };
    match fs::metadata(&base_dir) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => {
            log::warn!(
                "Pattern '{}': '{}' is not a directory, skipping",
                pattern,
                parsed.base_path
            );
            return Ok(Vec::new());
        }
        Err(e) => {
            log::warn!(
                "Pattern '{}': directory '{}' does not exist ({}), skipping",
                pattern,
                parsed.base_path,
                e
            );
            return Ok(Vec::new());
        }
    }

    let walk = match walk_files(&base_dir) {
        Ok(walk) => walk,
        Err(e) => {
            log::warn!("Pattern '{}': {}", pattern, e);
            return Ok(Vec::new());
        }
    };

    let base_key = Path::new(&parsed.base_path);
    let mut matches = Vec::new();
    for file in walk {
        let key = path_string(&base_key.join(&file.relative_path));
        let keep = match &parsed.filter {
            PrefixFilter::All => true,
            PrefixFilter::Extension(ext) => key.ends_with(&format!(".{}", ext)),
            PrefixFilter::Basename(_) => file
                .path
                .file_name()
                .and_then(|name| name.to_str())
                .zip(basename_glob.as_ref())
                .is_some_and(|(name, glob)| glob.matches_with(name, PLAIN_GLOB_OPTIONS)),
        };
        if keep {
            log::trace!("Matched file: {}", key);
            matches.push(key);
        }
    }

    if matches.is_empty() {
        log::info!("Pattern '{}' matched no files", pattern);
    }
    Ok(matches)
}

/// Single-level glob. Matched directories are expanded to every file
/// beneath them, with no filtering.
pub fn match_plain(root: &Path, pattern: &str) -> Result<Vec<String>> {
    compile_plain(pattern)?;
    if pattern.is_empty() {
        log::info!("Empty pattern matched no files");
        return Ok(Vec::new());
    }

    let absolute = Path::new(pattern).is_absolute();
    let full_pattern = if absolute {
        pattern.to_string()
    } else {
        let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
        path_string(&Path::new(&escaped_root).join(pattern))
    };
    let paths = glob::glob_with(&full_pattern, PLAIN_GLOB_OPTIONS)
        .map_err(|e| AppError::invalid_pattern(pattern, e.msg))?;

    let mut matches = Vec::new();
    for entry in paths {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                log::warn!("Pattern '{}': skipping unreadable path: {}", pattern, e);
                continue;
            }
        };
        let key: PathBuf = if absolute {
            path.clone()
        } else {
            path.strip_prefix(root)
                .unwrap_or(path.as_path())
                .components()
                .filter(|c| !matches!(c, Component::CurDir))
                .collect()
        };

        let metadata = fs::metadata(&path).map_err(|e| AppError::Stat {
            path: key.clone(),
            source: e,
        })?;
        if metadata.is_file() {
            log::trace!("Matched file: {}", key.display());
            matches.push(path_string(&key));
        } else if metadata.is_dir() {
            log::debug!("Expanding directory match: {}", key.display());
            match walk_files(&path) {
                Ok(walk) => {
                    matches.extend(walk.map(|file| path_string(&key.join(&file.relative_path))))
                }
                Err(e) => log::warn!("Pattern '{}': {}", pattern, e),
            }
        } else {
            log::debug!("Skipping special file: {}", key.display());
        }
    }

    if matches.is_empty() {
        log::info!("Pattern '{}' matched no files", pattern);
    }
    Ok(matches)
}
