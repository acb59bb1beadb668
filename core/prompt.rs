use crate::error::{AppError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static PREDEFINED_PROMPTS: Lazy<HashMap<String, String>> = Lazy::new(|| {
    let yaml_content = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../data/prompts.yaml"));
    serde_yml::from_str(yaml_content).expect("Failed to parse embedded data/prompts.yaml")
});

pub fn get_predefined_prompts() -> &'static HashMap<String, String> {
    &PREDEFINED_PROMPTS
}

pub fn predefined_prompt_names() -> Vec<&'static str> {
    let mut names: Vec<&str> = PREDEFINED_PROMPTS.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

pub fn get_predefined_prompt(name: &str) -> Result<String> {
    get_predefined_prompts().get(name).cloned().ok_or_else(|| {
        AppError::Config(format!(
            "Predefined prompt \"{}\" not found. Available: {}",
            name,
            predefined_prompt_names().join(", ")
        ))
    })
}

/// Joins a base prompt with the aggregate file document.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    base: String,
    diff_description: Option<String>,
}

impl PromptBuilder {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            diff_description: None,
        }
    }

    pub fn with_diff_description(mut self, description: impl Into<String>) -> Self {
        self.diff_description = Some(description.into());
        self
    }

    /// The document is appended untouched, so non-UTF-8 file content survives.
    pub fn build(&self, document: &[u8]) -> Vec<u8> {
        let base = self.base.trim_end();
        let mut prompt = Vec::with_capacity(base.len() + document.len() + 64);
        if !base.is_empty() {
            prompt.extend_from_slice(base.as_bytes());
            prompt.extend_from_slice(b"\n\n");
        }
        if let Some(description) = &self.diff_description {
            prompt.extend_from_slice(b"Included diff: ");
            prompt.extend_from_slice(description.as_bytes());
            prompt.extend_from_slice(b"\n\n");
        }
        prompt.extend_from_slice(document);
        prompt
    }
}
