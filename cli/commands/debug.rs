use crate::cli_args::DebugArgs;
use crate::commands::generate::collect_diff;
use crate::load_config_for_command;
use crate::output::print_data_or_text;
use anyhow::{Context, Result};
use colored::*;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table, presets::UTF8_FULL};
use log;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use xprompt_core::{Config, FileResolver, Resolution};

#[derive(Debug, Serialize)]
struct DebugInfo<'a> {
    project_root: &'a Path,
    includes: &'a [String],
    excludes: &'a [String],
    resolution: &'a Resolution,
    selected_files: Vec<String>,
}

pub fn handle_debug_command(args: DebugArgs, quiet: bool) -> Result<()> {
    let project_root = Config::determine_project_root(args.project_config.project_root.as_ref())
        .context("Failed to determine project root")?;
    log::info!("Project root determined: {}", project_root.display());

    let config = load_config_for_command(&project_root, &args.project_config)
        .context("Failed to load configuration for debug command")?;

    let diff_file = collect_diff(&args.patterns, &config, &project_root)?;
    let mut includes = config.effective_includes(&args.patterns.include);
    if let Some(diff) = &diff_file {
        includes.push(diff.include_pattern());
    }
    let excludes = config.effective_excludes(&args.patterns.exclude);

    log::debug!("Debug: resolving {} include patterns...", includes.len());
    let resolution = FileResolver::new(&project_root)
        .resolve(&includes, &excludes)
        .context("Failed to resolve file patterns for debug")?;

    let debug_data = DebugInfo {
        project_root: &project_root,
        includes: &includes,
        excludes: &excludes,
        resolution: &resolution,
        selected_files: resolution.files.to_sorted_vec(),
    };

    let plain_text = if args.format_output.format.is_none() {
        Some(render_debug_text(&debug_data, quiet))
    } else {
        None
    };
    print_data_or_text(&debug_data, plain_text, &args.format_output)
}

fn render_debug_text(info: &DebugInfo, quiet: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        "Project root:".green().bold(),
        info.project_root.display().to_string().blue()
    );

    if info.resolution.patterns.is_empty() {
        let _ = writeln!(out, "{}", "(No include patterns)".yellow());
    } else {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Pattern").fg(Color::Green),
            Cell::new("Style").fg(Color::Green),
            Cell::new("Matched").fg(Color::Green),
        ]);
        for entry in &info.resolution.patterns {
            let count = Cell::new(entry.matched).set_alignment(CellAlignment::Right);
            table.add_row(vec![
                Cell::new(entry.pattern.raw()).fg(Color::Cyan),
                Cell::new(entry.pattern.style()).fg(Color::DarkGrey),
                if entry.matched == 0 {
                    count.fg(Color::Yellow)
                } else {
                    count
                },
            ]);
        }
        let _ = writeln!(out, "{table}");
    }

    if !info.excludes.is_empty() {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Exclude").fg(Color::Green),
            Cell::new("Removed").fg(Color::Green),
        ]);
        for (pattern, removed) in info.resolution.exclusions.iter() {
            table.add_row(vec![
                Cell::new(pattern).fg(Color::Cyan),
                Cell::new(removed).set_alignment(CellAlignment::Right),
            ]);
        }
        let _ = writeln!(out, "{table}");
    }

    let _ = writeln!(
        out,
        "{} {} matched, {} excluded, {} selected",
        "Files:".green().bold(),
        info.resolution.matched_count,
        info.resolution.exclusions.total_removed(),
        info.selected_files.len()
    );
    if !quiet {
        for path in &info.selected_files {
            let _ = writeln!(out, "  {}", path);
        }
    }
    out
}
