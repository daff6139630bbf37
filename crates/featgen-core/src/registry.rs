//! Template registry: which files a feature gets for each route.
//!
//! The registry maps a [`RouteKind`] to a [`DirectoryConfig`], an ordered list of
//! feature sub-directories, each holding one or more [`FileTemplateEntry`] values.
//! Output names are patterns written in the same placeholder protocol as the
//! templates themselves (see [`crate::placeholder`]).
//!
//! Two built-in tables exist, one per [`Stack`]. They share every directory
//! except the UI component and the test stub, and the React table leaves
//! `model/types/requests` out of the GET/MODEL route.
//!
//! # Examples
//!
//! ```
//! use featgen_core::registry::{Registry, Stack};
//! use featgen_core::request::{GetReturnType, RouteKind};
//!
//! let registry = Registry::builtin(Stack::Vue);
//! let config = registry.resolve(RouteKind::Get(GetReturnType::Collection)).unwrap();
//! assert!(config.contains("api"));
//! assert!(!config.contains("lib"));
//! ```

// Internal imports (std, crate)
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::placeholder::PlaceholderContext;
use crate::request::{GetReturnType, RouteKind};
use crate::{Error, Result};

// External imports (alphabetized)
use serde::{Deserialize, Serialize};

/// Directories pre-checked in the directory prompt when the route offers them
pub const PREFERRED_DEFAULT_DIRECTORIES: [&str; 6] = [
    "api",
    "lib",
    "model/types",
    "model/types/requests",
    "model/types/responses",
    "ui",
];

/// Front-end stack the generated feature targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Stack {
    /// Vue single-file components
    #[default]
    Vue,
    /// React function components
    React,
}

impl Stack {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stack::Vue => "vue",
            Stack::React => "react",
        }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stack {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vue" => Ok(Stack::Vue),
            "react" => Ok(Stack::React),
            _ => Err(format!("Unknown stack: {}", s)),
        }
    }
}

/// One file emitted into a registry directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTemplateEntry {
    /// Output file name pattern, e.g. `{{FeatureName}}Req.ts`
    pub name: String,
    /// Template identifier, e.g. `req-template.ts`
    pub template: String,
}

impl FileTemplateEntry {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
        }
    }
}

/// A feature sub-directory and the files generated into it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Directory relative to the feature root, e.g. `model/types/requests`
    pub path: String,
    pub files: Vec<FileTemplateEntry>,
}

/// Ordered directory → files mapping for a single route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectoryConfig {
    directories: Vec<DirectoryEntry>,
}

impl DirectoryConfig {
    pub fn new(directories: Vec<DirectoryEntry>) -> Self {
        Self { directories }
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    /// Directory names in registry order
    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.directories.iter().map(|d| d.path.as_str())
    }

    pub fn contains(&self, directory: &str) -> bool {
        self.directories.iter().any(|d| d.path == directory)
    }

    pub fn files(&self, directory: &str) -> Option<&[FileTemplateEntry]> {
        self.directories
            .iter()
            .find(|d| d.path == directory)
            .map(|d| d.files.as_slice())
    }

    /// Preferred directories this route offers, in registry order
    pub fn default_selection(&self) -> Vec<&str> {
        self.directories()
            .filter(|dir| PREFERRED_DEFAULT_DIRECTORIES.contains(dir))
            .collect()
    }

    /// Expand the selected directories into concrete output files.
    ///
    /// Files come out in registry order; selected names the route does not
    /// offer are ignored.
    pub fn plan(
        &self,
        selected: &BTreeSet<String>,
        placeholders: &PlaceholderContext,
    ) -> Vec<ResolvedFile> {
        self.directories
            .iter()
            .filter(|dir| selected.contains(&dir.path))
            .flat_map(|dir| {
                dir.files.iter().map(move |file| ResolvedFile {
                    relative_directory: dir.path.clone(),
                    output_file_name: placeholders.apply(&file.name),
                    template_id: file.template.clone(),
                })
            })
            .collect()
    }
}

/// A planned output file, with the feature name already substituted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFile {
    pub relative_directory: String,
    pub output_file_name: String,
    pub template_id: String,
}

/// Route → directory configuration table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    routes: BTreeMap<RouteKind, DirectoryConfig>,
}

impl Registry {
    /// Build the built-in table for a stack
    pub fn builtin(stack: Stack) -> Self {
        let table = match stack {
            Stack::Vue => VUE_TABLE,
            Stack::React => REACT_TABLE,
        };

        let routes = table
            .iter()
            .map(|(route, dirs)| {
                let directories = dirs
                    .iter()
                    .map(|(path, files)| DirectoryEntry {
                        path: (*path).to_string(),
                        files: files
                            .iter()
                            .map(|(name, template)| FileTemplateEntry::new(*name, *template))
                            .collect(),
                    })
                    .collect();
                (*route, DirectoryConfig::new(directories))
            })
            .collect();

        Self { routes }
    }

    /// Insert or replace the configuration for a route
    pub fn insert(&mut self, route: RouteKind, config: DirectoryConfig) {
        self.routes.insert(route, config);
    }

    pub fn get(&self, route: RouteKind) -> Option<&DirectoryConfig> {
        self.routes.get(&route)
    }

    /// Look up a route, treating a missing or empty configuration as unresolvable
    pub fn resolve(&self, route: RouteKind) -> Result<&DirectoryConfig> {
        match self.routes.get(&route) {
            Some(config) if !config.is_empty() => Ok(config),
            _ => Err(Error::UnresolvedRoute {
                method: route.method().to_string(),
                return_type: route.return_type().map(|rt| rt.to_string()),
            }),
        }
    }

    pub fn routes(&self) -> impl Iterator<Item = RouteKind> + '_ {
        self.routes.keys().copied()
    }
}

type StaticFiles = &'static [(&'static str, &'static str)];
type StaticDirectory = (&'static str, StaticFiles);
type StaticTable = &'static [(RouteKind, &'static [StaticDirectory])];

const API: StaticDirectory = ("api", &[("api-{{feature-name}}.ts", "api-template.ts")]);

const LIB_MAP_BOTH: StaticDirectory = (
    "lib",
    &[
        ("map-{{feature-name}}-dto-to-req.ts", "map-dto-to-req-template.ts"),
        ("map-{{feature-name}}-rsp-to-dto.ts", "map-rsp-to-dto-template.ts"),
    ],
);

const LIB_MAP_RSP: StaticDirectory = (
    "lib",
    &[("map-{{feature-name}}-rsp-to-dto.ts", "map-rsp-to-dto-template.ts")],
);

const FACTORIES: StaticDirectory = (
    "model/factories",
    &[("{{feature-name}}-dto-factory.ts", "dto-factory-template.ts")],
);

const REQUESTS: StaticDirectory = (
    "model/types/requests",
    &[("{{FeatureName}}Req.ts", "req-template.ts")],
);

const RESPONSES: StaticDirectory = (
    "model/types/responses",
    &[("{{FeatureName}}Rsp.ts", "rsp-template.ts")],
);

const TYPES: StaticDirectory = ("model/types", &[("{{FeatureName}}Dto.ts", "dto-template.ts")]);

const VALIDATION_RULES: StaticDirectory = (
    "model/validation-rules",
    &[("{{feature-name}}-validation-rules.ts", "validation-rules-template.ts")],
);

const VUE_UI: StaticDirectory = ("ui", &[("{{FeatureName}}.vue", "vue-template.vue")]);

const VUE_TESTS: StaticDirectory = (
    "__tests__",
    &[("{{feature-name}}.test.ts", "test-template.ts")],
);

const REACT_UI: StaticDirectory = ("ui", &[("{{FeatureName}}.tsx", "react-template.tsx")]);

const REACT_TESTS: StaticDirectory = (
    "__tests__",
    &[("{{feature-name}}.test.tsx", "test-template.tsx")],
);

const VUE_TABLE: StaticTable = &[
    (
        RouteKind::Post,
        &[API, LIB_MAP_BOTH, FACTORIES, REQUESTS, RESPONSES, TYPES, VALIDATION_RULES, VUE_UI, VUE_TESTS],
    ),
    (
        RouteKind::Get(GetReturnType::Model),
        &[API, LIB_MAP_RSP, REQUESTS, RESPONSES, TYPES, VUE_UI, VUE_TESTS],
    ),
    (
        RouteKind::Get(GetReturnType::Collection),
        &[API, RESPONSES, TYPES, VUE_UI, VUE_TESTS],
    ),
    (
        RouteKind::Get(GetReturnType::Paginate),
        &[API, LIB_MAP_RSP, REQUESTS, RESPONSES, TYPES, VUE_UI, VUE_TESTS],
    ),
    (
        RouteKind::Put,
        &[API, LIB_MAP_BOTH, FACTORIES, REQUESTS, RESPONSES, TYPES, VALIDATION_RULES, VUE_UI, VUE_TESTS],
    ),
    (RouteKind::Delete, &[API, REQUESTS, VUE_UI, VUE_TESTS]),
];

const REACT_TABLE: StaticTable = &[
    (
        RouteKind::Post,
        &[API, LIB_MAP_BOTH, FACTORIES, REQUESTS, RESPONSES, TYPES, VALIDATION_RULES, REACT_UI, REACT_TESTS],
    ),
    (
        RouteKind::Get(GetReturnType::Model),
        &[API, LIB_MAP_RSP, RESPONSES, TYPES, REACT_UI, REACT_TESTS],
    ),
    (
        RouteKind::Get(GetReturnType::Collection),
        &[API, RESPONSES, TYPES, REACT_UI, REACT_TESTS],
    ),
    (
        RouteKind::Get(GetReturnType::Paginate),
        &[API, LIB_MAP_RSP, REQUESTS, RESPONSES, TYPES, REACT_UI, REACT_TESTS],
    ),
    (
        RouteKind::Put,
        &[API, LIB_MAP_BOTH, FACTORIES, REQUESTS, RESPONSES, TYPES, VALIDATION_RULES, REACT_UI, REACT_TESTS],
    ),
    (RouteKind::Delete, &[API, REQUESTS, REACT_UI, REACT_TESTS]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;

    fn ctx(feature: &str) -> PlaceholderContext {
        PlaceholderContext {
            feature_path: format!("@/features/{}", feature),
            feature_name_kebab: feature.to_string(),
            feature_name_pascal: crate::utils::to_pascal_case(feature),
            feature_name_camel: crate::utils::to_camel_case(feature),
        }
    }

    fn all_dirs(config: &DirectoryConfig) -> BTreeSet<String> {
        config.directories().map(String::from).collect()
    }

    #[test]
    fn test_every_route_is_non_empty() {
        for stack in [Stack::Vue, Stack::React] {
            let registry = Registry::builtin(stack);
            for route in RouteKind::ALL {
                let config = registry.resolve(route).unwrap();
                assert!(!config.is_empty(), "{} {} is empty", stack, route);
                for dir in config.directories() {
                    assert!(!config.files(dir).unwrap().is_empty());
                }
            }
            assert_eq!(registry.routes().count(), RouteKind::ALL.len());
        }
    }

    #[test]
    fn test_get_without_return_type_fails() {
        let err = RouteKind::new(HttpMethod::Get, None).unwrap_err();
        assert!(err.is_unresolved_route());
    }

    #[test]
    fn test_missing_or_empty_route_is_unresolved() {
        let mut registry = Registry::default();
        assert!(registry.resolve(RouteKind::Post).unwrap_err().is_unresolved_route());

        registry.insert(RouteKind::Post, DirectoryConfig::default());
        assert!(registry.resolve(RouteKind::Post).unwrap_err().is_unresolved_route());
    }

    #[test]
    fn test_post_plan_names() {
        let registry = Registry::builtin(Stack::Vue);
        let config = registry.resolve(RouteKind::Post).unwrap();
        let files = config.plan(&all_dirs(config), &ctx("order-item"));

        let names: Vec<(&str, &str)> = files
            .iter()
            .map(|f| (f.relative_directory.as_str(), f.output_file_name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("api", "api-order-item.ts"),
                ("lib", "map-order-item-dto-to-req.ts"),
                ("lib", "map-order-item-rsp-to-dto.ts"),
                ("model/factories", "order-item-dto-factory.ts"),
                ("model/types/requests", "OrderItemReq.ts"),
                ("model/types/responses", "OrderItemRsp.ts"),
                ("model/types", "OrderItemDto.ts"),
                ("model/validation-rules", "order-item-validation-rules.ts"),
                ("ui", "OrderItem.vue"),
                ("__tests__", "order-item.test.ts"),
            ]
        );
        assert_eq!(files[0].template_id, "api-template.ts");
        assert_eq!(files[8].template_id, "vue-template.vue");
    }

    #[test]
    fn test_get_collection_directories() {
        let registry = Registry::builtin(Stack::Vue);
        let config = registry
            .resolve(RouteKind::Get(GetReturnType::Collection))
            .unwrap();
        let dirs: Vec<&str> = config.directories().collect();
        assert_eq!(
            dirs,
            vec!["api", "model/types/responses", "model/types", "ui", "__tests__"]
        );
        assert!(!config.contains("lib"));
        assert!(!config.contains("model/types/requests"));
    }

    #[test]
    fn test_get_model_requests_differ_by_stack() {
        let route = RouteKind::Get(GetReturnType::Model);
        assert!(Registry::builtin(Stack::Vue)
            .resolve(route)
            .unwrap()
            .contains("model/types/requests"));
        assert!(!Registry::builtin(Stack::React)
            .resolve(route)
            .unwrap()
            .contains("model/types/requests"));
    }

    #[test]
    fn test_react_ui_and_tests() {
        let registry = Registry::builtin(Stack::React);
        let config = registry.resolve(RouteKind::Delete).unwrap();
        let files = config.plan(&all_dirs(config), &ctx("tag"));
        let names: Vec<&str> = files.iter().map(|f| f.output_file_name.as_str()).collect();
        assert_eq!(names, vec!["api-tag.ts", "TagReq.ts", "Tag.tsx", "tag.test.tsx"]);
    }

    #[test]
    fn test_default_selection_is_preferred_subset() {
        let registry = Registry::builtin(Stack::Vue);
        let config = registry.resolve(RouteKind::Post).unwrap();
        assert_eq!(
            config.default_selection(),
            vec![
                "api",
                "lib",
                "model/types/requests",
                "model/types/responses",
                "model/types",
                "ui"
            ]
        );

        let config = registry.resolve(RouteKind::Delete).unwrap();
        assert_eq!(
            config.default_selection(),
            vec!["api", "model/types/requests", "ui"]
        );
    }

    #[test]
    fn test_plan_only_selected_directories() {
        let registry = Registry::builtin(Stack::Vue);
        let config = registry.resolve(RouteKind::Put).unwrap();
        let selected: BTreeSet<String> = ["lib", "ui", "not-a-dir"].iter().map(|s| s.to_string()).collect();
        let files = config.plan(&selected, &ctx("user"));
        let names: Vec<&str> = files.iter().map(|f| f.output_file_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["map-user-dto-to-req.ts", "map-user-rsp-to-dto.ts", "User.vue"]
        );
    }

    #[test]
    fn test_stack_parsing() {
        assert_eq!("Vue".parse::<Stack>().unwrap(), Stack::Vue);
        assert_eq!("react".parse::<Stack>().unwrap(), Stack::React);
        assert!("svelte".parse::<Stack>().is_err());
        assert_eq!(Stack::default(), Stack::Vue);
    }
}
