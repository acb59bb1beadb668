pub mod comment_style;
pub mod config;
pub mod diff;
pub mod error;
pub mod exclude;
pub mod gather;
pub mod matcher;
pub mod pattern;
pub mod prompt;
pub mod render;
pub mod resolver;
pub mod walk;

pub use comment_style::{CommentStyle, header_for, style_for_path};
pub use config::{Config, PromptSource};
pub use diff::{DiffFile, GitDiff, sanitize_branch_name};
pub use error::{AppError, Result};
pub use exclude::{ExclusionReport, apply_exclusions};
pub use gather::{Aggregation, MatchedFileSet, PatternMatches, aggregate, match_pattern};
pub use pattern::{Pattern, PatternStyle, PrefixFilter, PrefixPattern, classify};
pub use prompt::{
    PromptBuilder, get_predefined_prompt, get_predefined_prompts, predefined_prompt_names,
};
pub use render::render_document;
pub use resolver::{FileResolver, Resolution, aggregate_files};
pub use walk::{FileWalk, WalkedFile, walk_files};
