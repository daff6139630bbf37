//! Writes planned feature files to disk.
//!
//! Each [`ResolvedFile`] is processed on its own: ensure the directory, skip if
//! the file is already there, resolve the template, substitute placeholders and
//! write. A failure on one file is recorded in the report; the rest of the batch
//! still runs. Existing files are never overwritten.

// Internal imports (std, crate)
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::placeholder::PlaceholderContext;
use crate::registry::ResolvedFile;
use crate::request::RouteKind;
use crate::templates::TemplateResolver;
use crate::Result;

// External imports (alphabetized)
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// What happened to one planned file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Written from a template
    Created,
    /// No template found; an empty file was written
    CreatedEmpty,
    /// The file already existed and was left untouched
    Skipped,
    /// An I/O error stopped this file
    Failed(String),
}

/// Outcome of one planned file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub template_id: String,
    /// Where the template text came from, if one was found
    pub template_location: Option<String>,
    pub outcome: FileOutcome,
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.outcome {
            FileOutcome::Created => write!(f, "Created file: {}", path),
            FileOutcome::CreatedEmpty => write!(
                f,
                "Template \"{}\" not found. Creating empty file: {}",
                self.template_id, path
            ),
            FileOutcome::Skipped => write!(f, "File \"{}\" already exists, skipping.", path),
            FileOutcome::Failed(reason) => {
                write!(f, "Error creating file \"{}\": {}", path, reason)
            }
        }
    }
}

/// Per-file results of a materialization run, in processing order
#[derive(Debug, Clone, Default, Serialize)]
pub struct MaterializeReport {
    pub files: Vec<FileReport>,
}

impl MaterializeReport {
    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }

    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Created))
    }

    pub fn created_empty(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::CreatedEmpty))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed(_)))
    }

    /// One-line tally of the run
    pub fn summary(&self) -> String {
        format!(
            "{} created, {} created empty, {} skipped, {} failed",
            self.created(),
            self.created_empty(),
            self.skipped(),
            self.failed()
        )
    }
}

/// Writes resolved files below a feature directory
#[derive(Debug, Clone, Copy)]
pub struct Materializer<'a> {
    resolver: &'a TemplateResolver,
}

impl<'a> Materializer<'a> {
    pub fn new(resolver: &'a TemplateResolver) -> Self {
        Self { resolver }
    }

    /// Process every file in order; never aborts on a single-file failure.
    pub async fn materialize(
        &self,
        feature_dir: &Path,
        route: RouteKind,
        files: &[ResolvedFile],
        placeholders: &PlaceholderContext,
    ) -> MaterializeReport {
        let mut report = MaterializeReport::default();

        for file in files {
            let dir_path = join_relative(feature_dir, &file.relative_directory);
            let file_path = dir_path.join(&file.output_file_name);

            let (outcome, template_location) = match self
                .materialize_file(&dir_path, &file_path, route, file, placeholders)
                .await
            {
                Ok(result) => result,
                Err(e) => {
                    log::debug!("Failed to materialize {}: {}", file_path.display(), e);
                    (FileOutcome::Failed(e.to_string()), None)
                }
            };

            report.files.push(FileReport {
                path: file_path,
                template_id: file.template_id.clone(),
                template_location,
                outcome,
            });
        }

        report
    }

    async fn materialize_file(
        &self,
        dir_path: &Path,
        file_path: &Path,
        route: RouteKind,
        file: &ResolvedFile,
        placeholders: &PlaceholderContext,
    ) -> Result<(FileOutcome, Option<String>)> {
        fs::create_dir_all(dir_path).await?;

        if exists(file_path).await? {
            log::debug!("{} already exists", file_path.display());
            return Ok((FileOutcome::Skipped, None));
        }

        let resolved = self.resolver.resolve(&file.template_id, route).await;
        let (content, outcome, location) = match resolved {
            Some(template) => (
                placeholders.apply(&template.content),
                FileOutcome::Created,
                Some(template.location),
            ),
            None => (String::new(), FileOutcome::CreatedEmpty, None),
        };

        // create_new keeps the no-overwrite rule even if the file appeared meanwhile
        let mut out = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(file_path)
            .await
        {
            Ok(out) => out,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Ok((FileOutcome::Skipped, None));
            }
            Err(e) => return Err(e.into()),
        };
        out.write_all(content.as_bytes()).await?;
        out.flush().await?;

        log::debug!("Wrote {} ({} bytes)", file_path.display(), content.len());
        Ok((outcome, location))
    }
}

async fn exists(path: &Path) -> Result<bool> {
    match fs::metadata(path).await {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Join a `/`-separated registry directory onto a filesystem path
fn join_relative(base: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|s| !s.is_empty())
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
}
