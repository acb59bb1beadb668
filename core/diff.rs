//! Git diff provider.
//!
//! Produces at most one extra file for the aggregate document: the diff of
//! the current branch against a base branch, or of uncommitted work when
//! already on the base branch. The file lives in the system temp directory
//! and is removed when the returned [`DiffFile`] is dropped.

use crate::error::{AppError, Result};
use log;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{Builder, NamedTempFile};

pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Reserved name git reports for a detached HEAD.
const DETACHED_HEAD: &str = "HEAD";

#[derive(Debug)]
pub struct DiffFile {
    file: NamedTempFile,
    description: String,
}

impl DiffFile {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The path escaped so that glob resolution treats it literally.
    pub fn include_pattern(&self) -> String {
        glob::Pattern::escape(&self.path().to_string_lossy())
    }
}

/// Replace anything outside `[A-Za-z0-9._-]` so a branch name is safe in a
/// file name and free of glob metacharacters.
pub fn sanitize_branch_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        "unnamed".to_string()
    } else {
        sanitized
    }
}

#[derive(Debug, Clone)]
pub struct GitDiff {
    repo_dir: PathBuf,
    base_branch: String,
}

impl GitDiff {
    pub fn new(repo_dir: impl Into<PathBuf>, base_branch: impl Into<String>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            base_branch: base_branch.into(),
        }
    }

    fn git(&self, args: &[&str]) -> Result<Vec<u8>> {
        log::debug!(
            "Running git {} in {}",
            args.join(" "),
            self.repo_dir.display()
        );
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|e| AppError::Git(format!("failed to run git: {}", e)))?;
        if !output.status.success() {
            return Err(AppError::Git(format!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(output.stdout)
    }

    pub fn current_branch(&self) -> Result<String> {
        let out = self.git(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(String::from_utf8_lossy(&out).trim().to_string())
    }

    /// Write the relevant diff to a temp file. `Ok(None)` when it is empty.
    pub fn collect(&self) -> Result<Option<DiffFile>> {
        let branch = self.current_branch()?;
        let (diff, description) = if branch == self.base_branch || branch == DETACHED_HEAD {
            (
                self.git(&["diff", "HEAD"])?,
                format!("uncommitted changes on '{}'", branch),
            )
        } else {
            let range = format!("{}...HEAD", self.base_branch);
            (
                self.git(&["diff", &range])?,
                format!(
                    "changes on branch '{}' relative to '{}'",
                    branch, self.base_branch
                ),
            )
        };

        if diff.iter().all(u8::is_ascii_whitespace) {
            log::info!("No differences found ({})", description);
            return Ok(None);
        }

        let prefix = format!("xprompt-{}-", sanitize_branch_name(&branch));
        let mut file = Builder::new()
            .prefix(&prefix)
            .suffix(".diff")
            .tempfile()
            .map_err(AppError::Io)?;
        file.write_all(&diff).map_err(|e| AppError::FileWrite {
            path: file.path().to_path_buf(),
            source: e,
        })?;
        log::info!(
            "Wrote {} byte diff ({}) to {}",
            diff.len(),
            description,
            file.path().display()
        );
        Ok(Some(DiffFile { file, description }))
    }
}
