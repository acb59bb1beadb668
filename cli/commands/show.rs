use crate::cli_args::{FormatOutputOpts, ShowArgs, ShowItem};
use crate::output::print_data_or_text;
use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use xprompt_core::{get_predefined_prompt, get_predefined_prompts, predefined_prompt_names};

#[derive(Serialize)]
struct ShowOutputWrapper<'a> {
    name: &'a str,
    value: &'a str,
}

pub fn handle_show_command(args: ShowArgs, quiet: bool) -> Result<()> {
    match &args.item {
        ShowItem::Prompt { name } => {
            handle_show_prompt_singular(name.as_deref(), &args.format_output, quiet)
        }
        ShowItem::Prompts {} => handle_show_prompt_plural(&args.format_output),
    }
}

fn handle_show_prompt_singular(
    name: Option<&str>,
    format_opts: &FormatOutputOpts,
    quiet: bool,
) -> Result<()> {
    match name {
        Some(n) => {
            let text = get_predefined_prompt(n)?;
            let wrapper = ShowOutputWrapper {
                name: n,
                value: &text,
            };
            print_data_or_text(&wrapper, Some(text.clone()), format_opts)
        }
        None => {
            if !quiet {
                eprintln!(
                    "{}",
                    "Please specify a prompt name to show, or use 'show prompts' to show all."
                        .yellow()
                );
            }
            let names = predefined_prompt_names();
            let plain = format!("Available prompts: {}", names.join(", "));
            print_data_or_text(&names, Some(plain), format_opts)
        }
    }
}

fn handle_show_prompt_plural(format_opts: &FormatOutputOpts) -> Result<()> {
    let sorted_prompts: BTreeMap<_, _> = get_predefined_prompts().iter().collect();

    let mut pretty_text = String::new();
    let _ = writeln!(
        pretty_text,
        "{}",
        "--- Available Prompts ---".green().bold().underline()
    );
    for (key, text) in &sorted_prompts {
        let _ = writeln!(pretty_text, "\n{}", key.cyan().bold());
        for line in text.trim_end().lines() {
            let _ = writeln!(pretty_text, "  {}", line);
        }
    }
    print_data_or_text(&sorted_prompts, Some(pretty_text), format_opts)
}
