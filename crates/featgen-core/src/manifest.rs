//! Registry manifest format.
//!
//! A template tree may carry a `registry.yaml` next to its `feature/` directory.
//! When present it replaces the built-in registry table for the run, which lets a
//! project describe its own directory layout without rebuilding the tool.
//!
//! ```yaml
//! routes:
//!   - method: get
//!     return_type: collection
//!     directories:
//!       - path: api
//!         files:
//!           - name: api-{{feature-name}}.ts
//!             template: api-template.ts
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::registry::{DirectoryConfig, DirectoryEntry, Registry};
use crate::request::{GetReturnType, HttpMethod, RouteKind};
use crate::utils::is_contained_relative_path;

/// File name looked up in a template root
pub const MANIFEST_FILE: &str = "registry.yaml";

/// The root manifest structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryManifest {
    /// One entry per supported route
    #[serde(default)]
    pub routes: Vec<RouteManifest>,
}

/// Directory layout for a single method / return type pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteManifest {
    pub method: HttpMethod,

    /// Required for GET, forbidden otherwise
    #[serde(default)]
    pub return_type: Option<GetReturnType>,

    #[serde(default)]
    pub directories: Vec<DirectoryEntry>,
}

impl RegistryManifest {
    /// Load `registry.yaml` from a template root.
    ///
    /// Returns `Ok(None)` when the directory carries no manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but can't be read or contains invalid YAML.
    pub async fn load_from_dir(template_dir: &Path) -> crate::Result<Option<Self>> {
        let manifest_path = template_dir.join(MANIFEST_FILE);

        let content = match fs::read_to_string(&manifest_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No registry manifest at {}", manifest_path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(crate::Error::template(format!(
                    "Failed to read registry manifest at {}: {}",
                    manifest_path.display(),
                    e
                )));
            }
        };

        let manifest = Self::parse(&content).map_err(|e| {
            crate::Error::template(format!(
                "Invalid registry manifest at {}: {}",
                manifest_path.display(),
                e
            ))
        })?;

        log::debug!(
            "Loaded registry manifest from {} ({} routes)",
            manifest_path.display(),
            manifest.routes.len()
        );
        Ok(Some(manifest))
    }

    pub fn parse(content: &str) -> crate::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Build a registry from the manifest.
    ///
    /// Routes left out of the manifest stay unresolvable.
    pub fn into_registry(self) -> crate::Result<Registry> {
        let mut registry = Registry::default();

        for route in self.routes {
            let kind = RouteKind::new(route.method, route.return_type).map_err(|_| {
                crate::Error::config(format!(
                    "Invalid route in registry manifest: method {} with return type {}",
                    route.method,
                    route
                        .return_type
                        .map(|rt| rt.to_string())
                        .unwrap_or_else(|| "none".to_string())
                ))
            })?;

            if registry.get(kind).is_some() {
                return Err(crate::Error::config(format!(
                    "Duplicate route in registry manifest: {}",
                    kind
                )));
            }

            for dir in &route.directories {
                let escaping = std::iter::once(dir.path.as_str())
                    .chain(dir.files.iter().flat_map(|f| [f.name.as_str(), f.template.as_str()]))
                    .find(|p| !is_contained_relative_path(p));
                if let Some(bad) = escaping {
                    return Err(crate::Error::config(format!(
                        "Registry manifest path escapes its root in route {}: {}",
                        kind, bad
                    )));
                }
            }

            registry.insert(kind, DirectoryConfig::new(route.directories));
        }

        Ok(registry)
    }
}
