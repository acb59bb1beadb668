use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use crate::cli_args::FormatOutputOpts;

/// Print `data` as JSON or YAML when a format was requested, otherwise the
/// plain-text rendering.
pub fn print_data_or_text<T: Serialize>(
    data: &T,
    plain_text: Option<String>,
    format_opts: &FormatOutputOpts,
) -> Result<()> {
    let content = match (format_opts.format.as_deref(), plain_text) {
        (None, Some(text)) => text,
        (format, _) => serialize_output(data, format.unwrap_or("json"), format_opts.pretty)?,
    };
    if content.ends_with('\n') {
        write_to_stdout(content.as_bytes())
    } else {
        write_to_stdout(format!("{}\n", content).as_bytes())
    }
}

fn serialize_output<T: Serialize>(data: &T, format: &str, pretty_json: bool) -> Result<String> {
    match format.to_lowercase().as_str() {
        "yaml" | "yml" => serde_yml::to_string(data).context("Failed to serialize output as YAML"),
        _ => {
            let json = if pretty_json {
                serde_json::to_string_pretty(data)
            } else {
                serde_json::to_string(data)
            };
            json.context("Failed to serialize output as JSON")
        }
    }
}

pub fn write_to_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let mut file =
        File::create(path).with_context(|| format!("Failed to create file {}", path.display()))?;
    file.write_all(content)
        .with_context(|| format!("Failed to write to file {}", path.display()))?;
    Ok(())
}

/// Write `content` to stdout byte for byte.
pub fn write_to_stdout(content: &[u8]) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(content)
        .context("Failed to write to stdout")?;
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}
