use crate::error::{AppError, Result};
use crate::exclude::{self, ExclusionReport};
use crate::gather::{self, MatchedFileSet, PatternMatches};
use crate::render;
use log;
#[cfg(feature = "serde_support")]
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

/// Outcome of resolving include and exclude patterns, before rendering.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize))]
#[cfg_attr(feature = "serde_support", serde(rename_all = "camelCase"))]
pub struct Resolution {
    pub patterns: Vec<PatternMatches>,
    /// Unique files matched by the include patterns.
    pub matched_count: usize,
    /// Files left after exclusion.
    pub files: MatchedFileSet,
    pub exclusions: ExclusionReport,
}

/// Resolves patterns against an explicit root directory.
///
/// Relative patterns, relative-path exclusion tests and displayed paths are
/// all taken against `root`; the process working directory is never read.
#[derive(Debug, Clone)]
pub struct FileResolver {
    root: PathBuf,
}

impl FileResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_current_dir() -> Result<Self> {
        let cwd = env::current_dir().map_err(AppError::WorkingDirectory)?;
        Ok(Self::new(cwd))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, includes: &[String], excludes: &[String]) -> Result<Resolution> {
        log::debug!(
            "Resolving {} include and {} exclude patterns under {}",
            includes.len(),
            excludes.len(),
            self.root.display()
        );
        let aggregation = gather::aggregate(&self.root, includes)?;
        let matched_count = aggregation.files.len();
        let (files, exclusions) = exclude::apply_exclusions(&self.root, aggregation.files, excludes);
        log::info!(
            "{} files selected ({} excluded)",
            files.len(),
            exclusions.total_removed()
        );
        Ok(Resolution {
            patterns: aggregation.patterns,
            matched_count,
            files,
            exclusions,
        })
    }

    /// Resolve and render in one step. An empty include list renders nothing.
    pub fn render(&self, includes: &[String], excludes: &[String]) -> Result<Vec<u8>> {
        let resolution = self.resolve(includes, excludes)?;
        render::render_document(&self.root, &resolution.files)
    }
}

/// Resolve and render against the current working directory.
pub fn aggregate_files(includes: &[String], excludes: &[String]) -> Result<Vec<u8>> {
    FileResolver::from_current_dir()?.render(includes, excludes)
}
