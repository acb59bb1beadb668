use crate::cli_args::ConfigArgs;
use crate::output::{write_to_file, write_to_stdout};
use anyhow::{Context, Result};
use colored::*;
use xprompt_core::config::{DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME};
use xprompt_core::{AppError, Config};

pub fn handle_config_command(args: &ConfigArgs, quiet: bool) -> Result<()> {
    let content = Config::default()
        .to_toml_string()
        .context("Failed to serialize default configuration")?;

    if !args.init {
        return write_to_stdout(content.as_bytes());
    }

    let project_root = Config::determine_project_root(args.project_root.as_ref())
        .context("Failed to determine project root for config command")?;
    let path = project_root
        .join(DEFAULT_CONFIG_DIR)
        .join(DEFAULT_CONFIG_FILENAME);
    if path.exists() && !args.force {
        anyhow::bail!(AppError::InvalidArgument(format!(
            "Config file already exists at '{}'. Use --force to overwrite.",
            path.display()
        )));
    }
    write_to_file(&path, content.as_bytes())?;
    if !quiet {
        eprintln!(
            "{} Config written to: {}",
            "✅".green(),
            path.display().to_string().blue()
        );
    }
    Ok(())
}
