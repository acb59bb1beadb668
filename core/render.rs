use crate::comment_style;
use crate::error::{AppError, Result};
use crate::gather::{MatchedFileSet, relative_to_root};
use log;
use std::fs;
use std::path::Path;

/// Render the aggregate document.
///
/// Files appear in ascending order of their matched path, each as
/// `<header>\n<content>\n\n`. Content is copied byte for byte, whatever its
/// encoding. Any read failure aborts the whole render.
pub fn render_document(root: &Path, files: &MatchedFileSet) -> Result<Vec<u8>> {
    let mut document = Vec::new();
    for matched in files.to_sorted_vec() {
        let full_path = root.join(&matched);
        let bytes = fs::read(&full_path).map_err(|e| AppError::FileRead {
            path: full_path.clone(),
            source: e,
        })?;

        let display_path = relative_to_root(root, &matched)
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| matched.clone());
        let header = comment_style::header_for(Path::new(&matched), &display_path);
        if std::str::from_utf8(&bytes).is_err() {
            log::warn!("File '{}' is not valid UTF-8, copied as is", display_path);
        }

        document.extend_from_slice(header.as_bytes());
        document.push(b'\n');
        document.extend_from_slice(&bytes);
        document.extend_from_slice(b"\n\n");
        log::trace!("Rendered block for {}", display_path);
    }
    log::debug!(
        "Rendered {} files into {} bytes",
        files.len(),
        document.len()
    );
    Ok(document)
}
