//! featgen CLI entrypoint
//! Collects a feature description interactively and dispatches to the core generator.

mod prompt;

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use featgen_core::{Config, Error, Generator, Selector, Stack};
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::prompt::TerminalPrompter;

#[derive(Parser, Debug)]
#[command(name = "featgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (YAML, JSON or TOML); defaults to ./featgen.{yaml,yml,toml,json}
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base directory the root directory options are relative to
    #[arg(long)]
    output_root: Option<PathBuf>,

    /// Local template tree (contains `feature/`)
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// Remote template tree base URL
    #[arg(long, conflicts_with = "template_dir")]
    template_url: Option<Url>,

    /// Front-end stack the registry targets
    #[arg(long, value_enum)]
    stack: Option<Stack>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    async fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .await
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::discover(".")
                .await
                .context("Failed to load config from the current directory")?,
        };

        if let Some(output_root) = &self.output_root {
            config.output_root = output_root.clone();
        }
        if let Some(template_dir) = &self.template_dir {
            config.template_dir = Some(template_dir.clone());
            config.template_base_url = None;
        }
        if let Some(template_url) = &self.template_url {
            config.template_base_url = Some(template_url.clone());
            config.template_dir = None;
        }
        if let Some(stack) = self.stack {
            config.stack = stack;
        }

        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.load_config().await?;
    tracing::debug!(?config, "resolved configuration");

    let generator = Generator::from_config(&config)
        .await
        .context("Failed to initialize template registry")?;

    let mut prompter = TerminalPrompter::new();
    let request = match Selector::new(&config, generator.registry()).run(&mut prompter) {
        Ok(request) => request,
        Err(e @ Error::UnresolvedRoute { .. }) => {
            println!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to collect feature details"),
    };

    tracing::info!(
        feature = %request.feature_name,
        method = %request.http_method,
        "scaffolding feature"
    );

    let report = match generator.generate(&request).await {
        Ok(report) => report,
        Err(e @ Error::UnresolvedRoute { .. }) => {
            println!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to scaffold feature"),
    };

    for file in &report.files.files {
        if let Some(location) = &file.template_location {
            println!("Fetched template from: {}", location);
        }
        println!("{}", file);
    }
    println!("{}", report.files.summary());
    println!("Feature scaffolding complete.");
    Ok(())
}
