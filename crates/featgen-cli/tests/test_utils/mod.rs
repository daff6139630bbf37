//! Test utilities for featgen integration tests

#![allow(dead_code)]

// Internal imports (std, crate)
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use anyhow::Context;
use featgen_core::{Error, Prompter, Result};
use tempfile::TempDir;

/// Creates a temporary directory for test outputs
pub fn create_temp_dir() -> anyhow::Result<(TempDir, PathBuf)> {
    let temp_dir = tempfile::tempdir()?;
    let temp_path = temp_dir.path().to_path_buf();
    Ok((temp_dir, temp_path))
}

/// Workspace root, where the bundled `templates/` tree lives
pub fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(PathBuf::from)
        .context("Failed to determine project root directory")
}

/// Writes a small template tree with a shared and a method-specific layer
pub fn create_test_template_dir(dir: &Path) -> anyhow::Result<()> {
    let feature = dir.join("feature");
    fs::create_dir_all(feature.join("post"))?;
    fs::create_dir_all(feature.join("get/collection"))?;

    fs::write(feature.join("api-template.ts"), SHARED_API_TEMPLATE)?;
    fs::write(feature.join("dto-template.ts"), DTO_TEMPLATE)?;
    fs::write(feature.join("vue-template.vue"), VUE_TEMPLATE)?;
    fs::write(feature.join("post/api-template.ts"), POST_API_TEMPLATE)?;
    fs::write(feature.join("get/collection/api-template.ts"), COLLECTION_API_TEMPLATE)?;

    Ok(())
}

/// Asserts that a directory contains all the expected files
pub fn assert_dir_contains_files(dir: &Path, expected_files: &[&str]) -> anyhow::Result<()> {
    let mut missing_files = Vec::new();

    for file in expected_files {
        let path = dir.join(file);
        if !path.exists() {
            missing_files.push(path.display().to_string());
        }
    }

    if !missing_files.is_empty() {
        return Err(anyhow::anyhow!(
            "Missing expected files in {}:\n  {}",
            dir.display(),
            missing_files.join("\n  ")
        ));
    }

    Ok(())
}

/// Asserts that a file contains every given snippet
pub fn assert_file_contains<P: AsRef<Path>>(path: P, contents: &[&str]) -> anyhow::Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(anyhow::anyhow!("File not found: {}", path.display()));
    }

    let file_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let missing_contents: Vec<&str> = contents
        .iter()
        .filter(|expected| !file_content.contains(**expected))
        .copied()
        .collect();

    if !missing_contents.is_empty() {
        return Err(anyhow::anyhow!(
            "File {} is missing expected content:\n  {}",
            path.display(),
            missing_contents.join("\n  ")
        ));
    }

    Ok(())
}

/// One scripted answer
pub enum Answer {
    Pick(usize),
    Text(&'static str),
    Many(Vec<usize>),
    /// Accept the pre-checked directories
    Defaults,
}

/// Replays a fixed list of answers and records what it was shown
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub prompts: Vec<String>,
    pub messages: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            ..Default::default()
        }
    }

    fn next(&mut self, prompt: &str) -> Result<Answer> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| Error::prompt(format!("no scripted answer for {:?}", prompt)))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, prompt: &str, _items: &[String], _default: usize) -> Result<usize> {
        match self.next(prompt)? {
            Answer::Pick(i) => Ok(i),
            _ => Err(Error::prompt("expected a single choice")),
        }
    }

    fn input(&mut self, prompt: &str, _default: Option<&str>) -> Result<String> {
        match self.next(prompt)? {
            Answer::Text(text) => Ok(text.to_string()),
            _ => Err(Error::prompt("expected text")),
        }
    }

    fn multi_select(&mut self, prompt: &str, _items: &[String], defaults: &[bool]) -> Result<Vec<usize>> {
        match self.next(prompt)? {
            Answer::Many(indices) => Ok(indices),
            Answer::Defaults => Ok(defaults
                .iter()
                .enumerate()
                .filter(|(_, on)| **on)
                .map(|(i, _)| i)
                .collect()),
            _ => Err(Error::prompt("expected a multi choice")),
        }
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}

// Template content constants
const SHARED_API_TEMPLATE: &str = r#"// shared api for {{featurePath}}
export const {{featureName}}Api = {};
"#;

const POST_API_TEMPLATE: &str = r#"import type { {{FeatureName}}Req } from '{{featurePath}}/model/types/requests/{{FeatureName}}Req';

export async function post{{FeatureName}}(req: {{FeatureName}}Req) {
  return http.post('/{{feature-name}}', req);
}
"#;

const COLLECTION_API_TEMPLATE: &str = r#"export async function get{{FeatureName}}List() {
  return http.get('/{{feature-name}}');
}
"#;

const DTO_TEMPLATE: &str = r#"export interface {{FeatureName}}Dto {
  id: string;
}
"#;

const VUE_TEMPLATE: &str = r#"<script setup lang="ts">
import { {{featureName}}Api } from '{{featurePath}}/api/api-{{feature-name}}';
</script>

<template>
  <section class="{{feature-name}}"></section>
</template>
"#;
