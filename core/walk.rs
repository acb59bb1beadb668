use crate::error::{AppError, Result};
use log;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A non-directory entry found under a walk root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    pub path: PathBuf,
    /// Path relative to the walk root.
    pub relative_path: PathBuf,
}

/// Lazy recursive walk yielding every non-directory entry beneath a root.
///
/// Entries that fail mid-walk (permissions, files vanishing) are skipped.
/// Only failing to open the root is reported, by [`walk_files`].
pub struct FileWalk {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

pub fn walk_files(root: &Path) -> Result<FileWalk> {
    fs::read_dir(root).map_err(|e| AppError::WalkRoot {
        path: root.to_path_buf(),
        source: e,
    })?;
    log::trace!("Walking directory: {}", root.display());
    Ok(FileWalk {
        root: root.to_path_buf(),
        inner: WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter(),
    })
}

impl Iterator for FileWalk {
    type Item = WalkedFile;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(entry) => {
                    if entry.file_type().is_dir() {
                        continue;
                    }
                    // Symlinks to directories are not followed and never yielded.
                    if entry.path_is_symlink()
                        && fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
                    {
                        log::trace!("Skipping directory symlink: {}", entry.path().display());
                        continue;
                    }
                    let relative_path = entry
                        .path()
                        .strip_prefix(&self.root)
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|_| entry.path().to_path_buf());
                    return Some(WalkedFile {
                        path: entry.into_path(),
                        relative_path,
                    });
                }
                Err(e) => {
                    log::debug!(
                        "Skipping unreadable entry under {}: {}",
                        self.root.display(),
                        e
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn yields_nested_files_but_not_directories() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        fs::write(tmp.path().join("top.txt"), "t").unwrap();
        fs::write(tmp.path().join("a/b/deep.rs"), "d").unwrap();

        let found: BTreeSet<PathBuf> = walk_files(tmp.path())
            .unwrap()
            .map(|f| f.relative_path)
            .collect();

        let expected: BTreeSet<PathBuf> = [PathBuf::from("top.txt"), PathBuf::from("a/b/deep.rs")]
            .into_iter()
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        assert!(matches!(
            walk_files(&missing),
            Err(AppError::WalkRoot { .. })
        ));
    }

    #[test]
    fn directory_removed_mid_walk_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        for dir in ["a", "b", "c"] {
            fs::create_dir(tmp.path().join(dir)).unwrap();
            fs::write(tmp.path().join(dir).join("1"), dir).unwrap();
        }

        let mut walk = walk_files(tmp.path()).unwrap();
        let first = walk.next().unwrap();
        assert_eq!(first.relative_path, PathBuf::from("a/1"));

        // `b` is already listed under the root but not yet opened.
        fs::remove_dir_all(tmp.path().join("b")).unwrap();

        let rest: Vec<PathBuf> = walk.map(|f| f.relative_path).collect();
        assert_eq!(rest, vec![PathBuf::from("c/1")]);
    }

    #[test]
    fn walk_is_restartable() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("x.go"), "x").unwrap();
        assert_eq!(walk_files(tmp.path()).unwrap().count(), 1);
        assert_eq!(walk_files(tmp.path()).unwrap().count(), 1);
    }
}
