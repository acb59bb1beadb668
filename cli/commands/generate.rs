use crate::cli_args::{GenerateArgs, PatternOpts};
use crate::load_config_for_command;
use crate::output::{write_to_file, write_to_stdout};
use anyhow::{Context, Result};
use byte_unit::{Byte, UnitType};
use colored::*;
use log;
use std::fs;
use std::path::{Path, PathBuf};
use tiktoken_rs::cl100k_base;
use xprompt_core::{
    AppError, Config, DiffFile, FileResolver, GitDiff, PromptBuilder, PromptSource,
    get_predefined_prompt, render_document,
};

pub fn handle_generate_command(args: GenerateArgs, quiet: bool) -> Result<()> {
    let project_root = Config::determine_project_root(args.project_config.project_root.as_ref())
        .context("Failed to determine project root")?;
    log::info!("Project root determined: {}", project_root.display());

    let config = load_config_for_command(&project_root, &args.project_config)
        .context("Failed to load configuration")?;

    let base_prompt = resolve_base_prompt(&args, &config, &project_root)?;

    // Held until rendering is done; dropping it removes the temp file.
    let diff_file = collect_diff(&args.patterns, &config, &project_root)?;

    let mut includes = config.effective_includes(&args.patterns.include);
    if let Some(diff) = &diff_file {
        includes.push(diff.include_pattern());
    }
    if includes.is_empty() {
        anyhow::bail!(AppError::InvalidArgument(
            "No include patterns given. Pass PATTERN arguments or set [filters] include in the config file."
                .to_string()
        ));
    }
    let excludes = config.effective_excludes(&args.patterns.exclude);

    let resolver = FileResolver::new(&project_root);
    let resolution = resolver
        .resolve(&includes, &excludes)
        .context("Failed to resolve file patterns")?;
    let document = render_document(resolver.root(), &resolution.files)
        .context("Failed to render selected files")?;

    let mut builder = PromptBuilder::new(base_prompt);
    if let Some(diff) = &diff_file {
        builder = builder.with_diff_description(diff.description());
    }
    let prompt = builder.build(&document);
    drop(diff_file);

    let output_path = args.output.clone().or_else(|| {
        config
            .output
            .save_path
            .as_ref()
            .map(|p| relative_to(&project_root, p))
    });
    match &output_path {
        Some(path) => {
            write_to_file(path, &prompt)?;
            if !quiet {
                eprintln!(
                    "{} Prompt saved to: {}",
                    "✅".green(),
                    path.display().to_string().blue()
                );
            }
        }
        None => write_to_stdout(&prompt)?,
    }

    if args.stats {
        print_stats(
            config.general.project_name.as_deref().unwrap_or_default(),
            resolution.files.len(),
            resolution.exclusions.total_removed(),
            &prompt,
        )?;
    }
    Ok(())
}

fn resolve_base_prompt(args: &GenerateArgs, config: &Config, project_root: &Path) -> Result<String> {
    let source = if let Some(text) = &args.prompt {
        Some(PromptSource::Text(text.clone()))
    } else if let Some(file) = &args.prompt_file {
        Some(PromptSource::File(file.clone()))
    } else if let Some(name) = &args.prompt_name {
        Some(PromptSource::Named(name.clone()))
    } else {
        // Config-relative prompt files are taken against the project root.
        config.prompt_source().map(|source| match source {
            PromptSource::File(path) => PromptSource::File(relative_to(project_root, &path)),
            other => other,
        })
    };

    let base = match source {
        None => String::new(),
        Some(PromptSource::Text(text)) => text,
        Some(PromptSource::File(path)) => {
            log::debug!("Reading base prompt from {}", path.display());
            fs::read_to_string(&path).map_err(|e| AppError::FileRead {
                path: path.clone(),
                source: e,
            })?
        }
        Some(PromptSource::Named(name)) => get_predefined_prompt(&name)?,
    };
    Ok(base)
}

/// The branch diff as an extra file, when requested by flag or config.
pub(crate) fn collect_diff(
    patterns: &PatternOpts,
    config: &Config,
    project_root: &Path,
) -> Result<Option<DiffFile>> {
    if !(patterns.diff || config.diff.enabled) {
        return Ok(None);
    }
    let base_branch = patterns
        .base_branch
        .clone()
        .unwrap_or_else(|| config.diff.base_branch.clone());
    let diff = GitDiff::new(project_root, base_branch)
        .collect()
        .context("Failed to collect git diff")?;
    if diff.is_none() {
        log::warn!("--diff requested but there are no changes to include");
    }
    Ok(diff)
}

fn relative_to(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

fn print_stats(project_name: &str, files: usize, excluded: usize, prompt: &[u8]) -> Result<()> {
    let bpe = cl100k_base().map_err(|e| anyhow::anyhow!(AppError::TikToken(e.to_string())))?;
    let tokens = bpe.encode_ordinary(&String::from_utf8_lossy(prompt)).len();
    let size = Byte::from_u128(prompt.len() as u128)
        .unwrap_or_default()
        .get_appropriate_unit(UnitType::Binary)
        .to_string();

    eprintln!("{}", format!(" {} ", project_name).green().bold().underline());
    eprintln!("{:<14} {}", "Files:".green(), files.to_string().cyan());
    eprintln!("{:<14} {}", "Excluded:".green(), excluded.to_string().cyan());
    eprintln!("{:<14} {}", "Size:".green(), size.cyan());
    eprintln!("{:<14} {}", "Est. Tokens:".green(), tokens.to_string().cyan());
    Ok(())
}
