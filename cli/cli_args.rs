use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectConfigOpts {
    #[arg(
        long,
        help = "Directory patterns are resolved against (default: current dir).",
        help_heading = "Project Setup",
        value_name = "PATH"
    )]
    pub project_root: Option<PathBuf>,

    #[arg(
        long,
        help = "Specify path/filename of the TOML config file (default: .xtools/xprompt/xprompt.toml).",
        value_name = "CONFIG_FILE",
        conflicts_with = "disable_config_file",
        help_heading = "Project Setup"
    )]
    pub config_file: Option<String>,

    #[arg(
        long,
        help = "Disable loading any TOML config file.",
        conflicts_with = "config_file",
        help_heading = "Project Setup"
    )]
    pub disable_config_file: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FormatOutputOpts {
    #[arg(short = 'f', long, help = "Print structured output instead of a table.", value_name = "FORMAT", value_parser = ["json", "yaml"], help_heading = "Output Formatting")]
    pub format: Option<String>,

    #[arg(
        long,
        help = "Pretty-print JSON output.",
        help_heading = "Output Formatting"
    )]
    pub pretty: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PatternOpts {
    #[arg(
        value_name = "PATTERN",
        help = "Files to include: 'src/**/*.rs', 'src/.../*.rs', 'src/...', '*.go' or a directory."
    )]
    pub include: Vec<String>,

    #[arg(
        short = 'e',
        long = "exclude",
        value_name = "PATTERN",
        action = clap::ArgAction::Append,
        help = "Remove matching files (same pattern syntax; repeatable).",
        help_heading = "Content Filtering"
    )]
    pub exclude: Vec<String>,

    #[arg(
        long,
        help = "Include the git diff of the current branch as one more file.",
        help_heading = "Git Diff"
    )]
    pub diff: bool,

    #[arg(
        long,
        value_name = "BRANCH",
        help = "Branch to diff against [default: main].",
        help_heading = "Git Diff"
    )]
    pub base_branch: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "xprompt",
    author,
    version,
    about = "Assemble file contents into a single prompt document.",
    long_about = "xprompt resolves file patterns against a project directory, removes excluded \nfiles and prints every selected file's content under a comment header, \noptionally preceded by a base prompt and followed by a git diff.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  xprompt generate 'src/.../*.rs' -e '**/*_test.rs'\n  xprompt g 'cmd/...' --diff --prompt-name review\n  xprompt debug 'src/**/*.go' -f json",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(
        visible_alias = "g",
        visible_alias = "gen",
        about = "Resolve patterns and print the assembled prompt."
    )]
    Generate(GenerateArgs),

    #[command(
        visible_alias = "d",
        about = "Show how each pattern resolves and what exclusion removed."
    )]
    Debug(DebugArgs),

    #[command(visible_alias = "s", about = "Show predefined base prompts.")]
    Show(ShowArgs),

    #[command(about = "Generate shell completion scripts.")]
    Completion(CompletionArgs),

    #[command(about = "Print the default configuration file.")]
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[clap(flatten)]
    pub patterns: PatternOpts,

    #[arg(
        long,
        value_name = "TEXT",
        conflicts_with_all = ["prompt_file", "prompt_name"],
        help = "Base prompt text placed before the files.",
        help_heading = "Prompt"
    )]
    pub prompt: Option<String>,

    #[arg(
        long,
        value_name = "PATH",
        conflicts_with = "prompt_name",
        help = "Read the base prompt from a file.",
        help_heading = "Prompt"
    )]
    pub prompt_file: Option<PathBuf>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Use a predefined base prompt (see 'xprompt show prompts').",
        help_heading = "Prompt"
    )]
    pub prompt_name: Option<String>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write the prompt to FILE instead of stdout.",
        help_heading = "Output Control"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        help = "Print file count, size and estimated tokens to stderr.",
        help_heading = "Output Control"
    )]
    pub stats: bool,
}

#[derive(Args, Debug, Clone)]
pub struct DebugArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[clap(flatten)]
    pub patterns: PatternOpts,
    #[clap(flatten)]
    pub format_output: FormatOutputOpts,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[clap(flatten)]
    pub format_output: FormatOutputOpts,
    #[command(subcommand)]
    pub item: ShowItem,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ShowItem {
    #[command(about = "Show one predefined prompt, or list the available names.")]
    Prompt { name: Option<String> },
    #[command(about = "Show all predefined prompts.")]
    Prompts {},
}

#[derive(Args, Debug, Clone)]
pub struct CompletionArgs {
    #[arg(
        long,
        value_name = "SHELL",
        help = "Shell to generate completions for (fish, bash, zsh) [default: fish]"
    )]
    pub shell: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        long,
        help = "Write the default config to <PROJECT_ROOT>/.xtools/xprompt/xprompt.toml instead of printing it."
    )]
    pub init: bool,

    #[arg(long, requires = "init", help = "Overwrite an existing config file.")]
    pub force: bool,

    #[arg(long, value_name = "PATH", help = "Project root for --init (default: current dir).")]
    pub project_root: Option<PathBuf>,
}
