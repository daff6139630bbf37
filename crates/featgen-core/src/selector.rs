//! Interactive collection of a [`GenerationRequest`].
//!
//! The [`Selector`] drives a fixed sequence of prompts through a [`Prompter`]
//! backend. Free-text answers go through a validation function; an invalid
//! answer prints the field's error message and asks again, as many times as it
//! takes. The terminal backend lives in the CLI crate; tests drive the selector
//! with a scripted backend.

use std::collections::BTreeSet;

use crate::config::Config;
use crate::registry::Registry;
use crate::request::{GenerationRequest, GetReturnType, HttpMethod, RootDir, RouteKind};
use crate::utils::{is_kebab_case, is_kebab_case_path, path_segments};
use crate::{Error, Result};

pub const PARENT_DIR_ERROR: &str =
    "Directory path must be in kebab-case (e.g., 'my-parent-dir/sub-dir'). Please try again.";
pub const FEATURE_NAME_ERROR: &str =
    "Feature name must be in kebab-case (e.g., 'my-feature-name'). Please try again.";
pub const DIRECTORY_SELECTION_ERROR: &str = "Select at least one directory.";

/// A prompt backend
pub trait Prompter {
    /// Choose one item, returning its index
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize>;

    /// Read a line of free text
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Choose any number of items, returning their indices
    fn multi_select(&mut self, prompt: &str, items: &[String], defaults: &[bool]) -> Result<Vec<usize>>;

    /// Show a notice, e.g. a validation error
    fn message(&mut self, text: &str);
}

/// Strip a repeated root prefix and split the parent directory into segments.
///
/// An empty answer, or one naming a root option itself, means "no subdirectory".
pub fn normalize_parent_dir(
    input: &str,
    root_dirs: &[RootDir],
) -> std::result::Result<Vec<String>, &'static str> {
    let input = input.trim();
    let is_root = |s: &str| root_dirs.iter().any(|root| root.path == s.trim_end_matches('/'));

    if input.is_empty() || is_root(input) {
        return Ok(Vec::new());
    }

    // Longest root prefix wins so `src/shared/features/x` never matches `src/`
    let stripped = root_dirs
        .iter()
        .filter_map(|root| {
            input
                .strip_prefix(root.path.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .map(|rest| (root.path.len(), rest))
        })
        .max_by_key(|(len, _)| *len)
        .map(|(_, rest)| rest)
        .unwrap_or(input);

    if stripped.is_empty() || is_root(stripped) {
        return Ok(Vec::new());
    }

    if is_kebab_case_path(stripped) {
        Ok(path_segments(stripped).into_iter().map(String::from).collect())
    } else {
        Err(PARENT_DIR_ERROR)
    }
}

pub fn validate_feature_name(input: &str) -> std::result::Result<String, &'static str> {
    if is_kebab_case(input) {
        Ok(input.to_string())
    } else {
        Err(FEATURE_NAME_ERROR)
    }
}

/// Ask until `validate` accepts the answer
pub fn prompt_until_valid<P, T, F>(
    prompter: &mut P,
    prompt: &str,
    default: Option<&str>,
    validate: F,
) -> Result<T>
where
    P: Prompter + ?Sized,
    F: Fn(&str) -> std::result::Result<T, &'static str>,
{
    loop {
        let answer = prompter.input(prompt, default)?;
        match validate(&answer) {
            Ok(value) => return Ok(value),
            Err(msg) => {
                log::debug!("Rejected answer {:?} for {:?}", answer, prompt);
                prompter.message(msg);
            }
        }
    }
}

/// Runs the prompt sequence against a configuration and registry
pub struct Selector<'a> {
    config: &'a Config,
    registry: &'a Registry,
}

impl<'a> Selector<'a> {
    pub fn new(config: &'a Config, registry: &'a Registry) -> Self {
        Self { config, registry }
    }

    /// Collect a complete request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedRoute`] when the chosen route has no (or an
    /// empty) directory configuration, and propagates backend failures.
    pub fn run<P: Prompter + ?Sized>(&self, prompter: &mut P) -> Result<GenerationRequest> {
        let root_dirs = &self.config.root_dirs;
        if root_dirs.is_empty() {
            return Err(Error::config("No root directory options configured"));
        }

        // 1. Root directory
        let labels: Vec<String> = root_dirs.iter().map(|r| r.label.clone()).collect();
        let root_idx = prompter.select("Select root directory:", &labels, 0)?;
        let root_dir = root_dirs
            .get(root_idx)
            .cloned()
            .ok_or_else(|| Error::prompt(format!("Invalid root directory choice: {}", root_idx)))?;

        // 2. Parent subdirectory
        let parent_default = format!("{}/", root_dir.path);
        let parent_dir = prompt_until_valid(
            prompter,
            "Enter subdirectory (optional):",
            Some(&parent_default),
            |answer| normalize_parent_dir(answer, root_dirs),
        )?;

        // 3. Feature name
        let feature_name = prompt_until_valid(
            prompter,
            "Enter feature name (kebab-case only):",
            None,
            validate_feature_name,
        )?;

        // 4. HTTP method
        let methods: Vec<String> = HttpMethod::PROMPT_ORDER
            .iter()
            .map(|m| m.as_str().to_uppercase())
            .collect();
        let method_idx = prompter.select("Select the API route method:", &methods, 0)?;
        let http_method = *HttpMethod::PROMPT_ORDER
            .get(method_idx)
            .ok_or_else(|| Error::prompt(format!("Invalid method choice: {}", method_idx)))?;

        // 5. GET return type
        let get_return_type = if http_method == HttpMethod::Get {
            let shapes: Vec<String> = GetReturnType::ALL
                .iter()
                .map(|rt| rt.as_str().to_uppercase())
                .collect();
            let idx = prompter.select("Select the GET action return type:", &shapes, 0)?;
            Some(
                *GetReturnType::ALL
                    .get(idx)
                    .ok_or_else(|| Error::prompt(format!("Invalid return type choice: {}", idx)))?,
            )
        } else {
            None
        };

        // 6. Directory subset
        let route = RouteKind::new(http_method, get_return_type)?;
        let selected_directories = self.select_directories(prompter, route)?;

        Ok(GenerationRequest {
            root_path: self.config.output_root.clone(),
            root_dir,
            parent_dir,
            feature_name,
            http_method,
            get_return_type,
            selected_directories,
        })
    }

    fn select_directories<P: Prompter + ?Sized>(
        &self,
        prompter: &mut P,
        route: RouteKind,
    ) -> Result<BTreeSet<String>> {
        let directory_config = self.registry.resolve(route)?;
        let available: Vec<String> = directory_config.directories().map(String::from).collect();
        let preferred = directory_config.default_selection();
        let defaults: Vec<bool> = available
            .iter()
            .map(|dir| preferred.contains(&dir.as_str()))
            .collect();

        loop {
            let chosen = prompter.multi_select(
                "Select the directories to include for this feature:",
                &available,
                &defaults,
            )?;
            let selected: BTreeSet<String> = chosen
                .into_iter()
                .filter_map(|idx| available.get(idx).cloned())
                .collect();
            if !selected.is_empty() {
                return Ok(selected);
            }
            prompter.message(DIRECTORY_SELECTION_ERROR);
        }
    }
}
