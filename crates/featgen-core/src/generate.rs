//! Feature generation entry point.
//!
//! A [`Generator`] pairs the registry for the configured stack with a template
//! resolver. It is built once per run, handed to the selector for the directory
//! prompt, and then asked to materialize the collected request.

use std::path::PathBuf;

use crate::{
    config::Config,
    error::Result,
    manifest::RegistryManifest,
    materialize::{MaterializeReport, Materializer},
    registry::{Registry, ResolvedFile},
    request::GenerationRequest,
    templates::{select_source, TemplateResolver, TemplateSource},
};

/// Outcome of a generation run
#[derive(Debug, Clone, serde::Serialize)]
pub struct GenerationReport {
    /// Directory the feature was generated into
    pub feature_dir: PathBuf,
    /// Logical import path substituted for `{{featurePath}}`
    pub feature_path: String,
    #[serde(flatten)]
    pub files: MaterializeReport,
}

/// Registry plus template resolver for one run
#[derive(Debug, Clone)]
pub struct Generator {
    registry: Registry,
    resolver: TemplateResolver,
}

impl Generator {
    pub fn new(registry: Registry, resolver: TemplateResolver) -> Self {
        Self { registry, resolver }
    }

    /// Build the generator described by a configuration.
    ///
    /// A local template tree carrying a `registry.yaml` overrides the built-in
    /// table for the configured stack.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let source = select_source(config.template_dir.as_deref(), config.template_base_url.as_ref())?;

        let registry = match &source {
            TemplateSource::Local(root) => match RegistryManifest::load_from_dir(root).await? {
                Some(manifest) => {
                    log::info!("Using registry manifest from {}", root.display());
                    manifest.into_registry()?
                }
                None => Registry::builtin(config.stack),
            },
            TemplateSource::Remote { .. } => Registry::builtin(config.stack),
        };

        Ok(Self::new(registry, TemplateResolver::new(source)))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn resolver(&self) -> &TemplateResolver {
        &self.resolver
    }

    /// Files the request would produce, in registry order
    pub fn plan(&self, request: &GenerationRequest) -> Result<Vec<ResolvedFile>> {
        let route = request.route()?;
        let directory_config = self.registry.resolve(route)?;
        Ok(directory_config.plan(&request.selected_directories, &request.placeholders()))
    }

    /// Materialize a request.
    ///
    /// # Errors
    ///
    /// Only an unresolvable route is an error, and it is raised before anything
    /// touches the filesystem. Per-file failures are recorded in the report.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationReport> {
        let route = request.route()?;
        let files = self.plan(request)?;
        let placeholders = request.placeholders();
        let feature_dir = request.feature_dir();

        log::debug!(
            "Generating {} files for route {} into {}",
            files.len(),
            route,
            feature_dir.display()
        );

        let report = Materializer::new(&self.resolver)
            .materialize(&feature_dir, route, &files, &placeholders)
            .await;

        Ok(GenerationReport {
            feature_dir,
            feature_path: placeholders.feature_path,
            files: report,
        })
    }
}

/// Build a generator from `config` and materialize `request` with it
pub async fn generate(config: &Config, request: &GenerationRequest) -> Result<GenerationReport> {
    Generator::from_config(config).await?.generate(request).await
}
