//! Template lookup for feature scaffolding.
//!
//! Templates are addressed by a logical path of the form
//! `feature/<method>[/<returnType>]/<templateId>`. A [`TemplateResolver`] tries an
//! ordered list of such paths against one [`TemplateSource`] and returns the first
//! hit, so a route-specific template shadows the shared one:
//!
//! | route            | candidates, in order                                            |
//! |------------------|-----------------------------------------------------------------|
//! | GET + returnType | `feature/get/<rt>/<id>`, `feature/get/<id>`, `feature/<id>`     |
//! | other methods    | `feature/<method>/<id>`, `feature/<id>`                         |
//!
//! Fetching fails soft: a missing template, an unreadable file or a failed HTTP
//! request all come back as "not found" and are logged.
//!
//! # Template root discovery
//!
//! When no source is configured, [`discover_template_root`] searches:
//! 1. Directory specified by the `FEATGEN_TEMPLATE_DIR` environment variable
//! 2. `./templates` in the current working directory
//! 3. `../templates`
//! 4. The `templates/` directory of the workspace this crate was built from
//! 5. `~/.featgen/templates` in the user's home directory

// Internal imports (std, crate)
use std::io;
use std::path::{Path, PathBuf};

use crate::request::RouteKind;
use crate::Result;

// External imports (alphabetized)
use tokio::fs;
use url::Url;

/// Environment variable overriding template root discovery
pub const TEMPLATE_DIR_ENV: &str = "FEATGEN_TEMPLATE_DIR";

/// Top-level directory of every logical template path
pub const FEATURE_PREFIX: &str = "feature";

/// Where template text comes from
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// A template tree on disk
    Local(PathBuf),
    /// A template tree served over HTTP
    Remote {
        base_url: Url,
        client: reqwest::Client,
    },
}

impl TemplateSource {
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self::Local(root.into())
    }

    /// Remote source rooted at `base_url`.
    ///
    /// A trailing slash is added when missing so logical paths join below it.
    pub fn remote(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self::Remote {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Human-readable location of a logical path
    pub fn location(&self, logical_path: &str) -> String {
        match self {
            Self::Local(root) => root.join(logical_path).display().to_string(),
            Self::Remote { base_url, .. } => base_url
                .join(logical_path)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| format!("{}{}", base_url, logical_path)),
        }
    }

    /// Fetch template text by logical path, `None` when unavailable
    pub async fn fetch(&self, logical_path: &str) -> Option<String> {
        match self {
            Self::Local(root) => Self::read_local(root, logical_path).await,
            Self::Remote { base_url, client } => {
                Self::fetch_remote(client, base_url, logical_path).await
            }
        }
    }

    async fn read_local(root: &Path, logical_path: &str) -> Option<String> {
        let path = root.join(logical_path);
        match fs::read_to_string(&path).await {
            Ok(content) => Some(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No template at {}", path.display());
                None
            }
            Err(e) => {
                log::warn!("Error reading template from {}: {}", path.display(), e);
                None
            }
        }
    }

    async fn fetch_remote(client: &reqwest::Client, base_url: &Url, logical_path: &str) -> Option<String> {
        let url = match base_url.join(logical_path) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("Invalid template URL {}{}: {}", base_url, logical_path, e);
                return None;
            }
        };

        log::debug!("Fetching template from: {}", url);
        let response = match client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Error fetching template from {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            log::debug!("Failed to fetch template at {}: HTTP {}", url, response.status());
            return None;
        }

        match response.text().await {
            Ok(content) => Some(content),
            Err(e) => {
                log::warn!("Failed to read response from {}: {}", url, e);
                None
            }
        }
    }
}

/// A template that was found, with the location it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    pub location: String,
    pub content: String,
}

/// Resolves template ids to template text with route-specific fallback
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    source: TemplateSource,
}

impl TemplateResolver {
    pub fn new(source: TemplateSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Ordered logical paths tried for a template id
    pub fn candidates(template_id: &str, route: RouteKind) -> Vec<String> {
        let method = route.method();
        let mut candidates = Vec::with_capacity(3);
        if let Some(return_type) = route.return_type() {
            candidates.push(format!(
                "{}/{}/{}/{}",
                FEATURE_PREFIX, method, return_type, template_id
            ));
        }
        candidates.push(format!("{}/{}/{}", FEATURE_PREFIX, method, template_id));
        candidates.push(format!("{}/{}", FEATURE_PREFIX, template_id));
        candidates
    }

    /// Find template text for an id, trying candidates in order
    pub async fn resolve(&self, template_id: &str, route: RouteKind) -> Option<ResolvedTemplate> {
        for candidate in Self::candidates(template_id, route) {
            if let Some(content) = self.source.fetch(&candidate).await {
                let location = self.source.location(&candidate);
                log::debug!("Resolved template {} at {}", template_id, location);
                return Some(ResolvedTemplate { location, content });
            }
        }
        log::debug!("Template {} not found for route {}", template_id, route);
        None
    }
}

/// Discovers the template root by looking in common locations
pub fn discover_template_root() -> Option<PathBuf> {
    // 1. Check environment variable
    if let Ok(dir) = std::env::var(TEMPLATE_DIR_ENV) {
        let path = PathBuf::from(dir);
        if path.exists() {
            return Some(path);
        }
        log::warn!("{} points to a missing directory: {}", TEMPLATE_DIR_ENV, path.display());
    }

    // 2. Check current directory, then its parent
    for candidate in ["templates", "../templates"] {
        let path = PathBuf::from(candidate);
        if path.join(FEATURE_PREFIX).is_dir() {
            return Some(path);
        }
    }

    // 3. Check the workspace this crate was built from (for development)
    let workspace_templates = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("templates");
    if workspace_templates.join(FEATURE_PREFIX).is_dir() {
        return Some(workspace_templates);
    }

    // 4. Check in the user's home directory
    if let Some(home_dir) = dirs::home_dir() {
        let path = home_dir.join(".featgen").join("templates");
        if path.exists() {
            return Some(path);
        }
    }

    None
}

/// Pick the template source: explicit directory, then base URL, then discovery.
pub fn select_source(template_dir: Option<&Path>, base_url: Option<&Url>) -> Result<TemplateSource> {
    if let Some(dir) = template_dir {
        if !dir.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Template directory not found: {}", dir.display()),
            )
            .into());
        }
        return Ok(TemplateSource::local(dir));
    }

    if let Some(url) = base_url {
        return Ok(TemplateSource::remote(url.clone()));
    }

    match discover_template_root() {
        Some(root) => {
            log::debug!("Using templates from: {}", root.display());
            Ok(TemplateSource::local(root))
        }
        None => {
            log::warn!("No template directory found; every file will be created empty");
            Ok(TemplateSource::local(PathBuf::from("templates")))
        }
    }
}
