//! featgen Core Library
//!
//! This library provides the core functionality for scaffolding front-end
//! feature modules (API wrapper, DTO and request/response types, validation
//! rules, UI component, test stub) from a route-keyed template registry.

pub mod config;
pub mod error;
pub mod generate;
pub mod manifest;
pub mod materialize;
pub mod placeholder;
pub mod registry;
pub mod request;
pub mod selector;
pub mod templates;
pub mod utils;

pub use crate::{
    config::Config,
    error::{Error, Result},
    generate::{generate, GenerationReport, Generator},
    materialize::{FileOutcome, FileReport, MaterializeReport},
    placeholder::PlaceholderContext,
    registry::{DirectoryConfig, FileTemplateEntry, Registry, ResolvedFile, Stack},
    request::{GenerationRequest, GetReturnType, HttpMethod, RootDir, RouteKind},
    selector::{Prompter, Selector},
    templates::{TemplateResolver, TemplateSource},
};
