//! Generation request model.
//!
//! A [`GenerationRequest`] is the fully resolved answer set collected by the
//! interactive selector. The HTTP method and the optional GET return type are
//! collapsed into a [`RouteKind`], the key the template registry is indexed by.

// Internal imports (std, crate)
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::utils::{join_logical_path, to_camel_case, to_pascal_case};
use crate::{Error, Result};

// External imports (alphabetized)
use serde::{Deserialize, Serialize};

/// HTTP method of the API call the feature wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Order in which the methods are offered to the user
    pub const PROMPT_ORDER: [HttpMethod; 4] = [
        HttpMethod::Post,
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Delete,
    ];

    /// Lowercase identifier, also used as the template directory name
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "delete" => Ok(HttpMethod::Delete),
            _ => Err(format!("Unknown HTTP method: {}", s)),
        }
    }
}

/// Shape of the data returned by a GET call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GetReturnType {
    Model,
    Collection,
    Paginate,
}

impl GetReturnType {
    pub const ALL: [GetReturnType; 3] = [
        GetReturnType::Model,
        GetReturnType::Collection,
        GetReturnType::Paginate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GetReturnType::Model => "model",
            GetReturnType::Collection => "collection",
            GetReturnType::Paginate => "paginate",
        }
    }
}

impl fmt::Display for GetReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GetReturnType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "model" => Ok(GetReturnType::Model),
            "collection" => Ok(GetReturnType::Collection),
            "paginate" => Ok(GetReturnType::Paginate),
            _ => Err(format!("Unknown GET return type: {}", s)),
        }
    }
}

/// Registry key: an HTTP method, carrying the return type only for GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RouteKind {
    Get(GetReturnType),
    Post,
    Put,
    Delete,
}

impl RouteKind {
    /// Every route the built-in registries cover
    pub const ALL: [RouteKind; 6] = [
        RouteKind::Post,
        RouteKind::Put,
        RouteKind::Delete,
        RouteKind::Get(GetReturnType::Model),
        RouteKind::Get(GetReturnType::Collection),
        RouteKind::Get(GetReturnType::Paginate),
    ];

    /// Build a route key, enforcing that a return type is present iff the method is GET.
    pub fn new(method: HttpMethod, return_type: Option<GetReturnType>) -> Result<Self> {
        match (method, return_type) {
            (HttpMethod::Get, Some(rt)) => Ok(RouteKind::Get(rt)),
            (HttpMethod::Post, None) => Ok(RouteKind::Post),
            (HttpMethod::Put, None) => Ok(RouteKind::Put),
            (HttpMethod::Delete, None) => Ok(RouteKind::Delete),
            (method, return_type) => Err(Error::UnresolvedRoute {
                method: method.to_string(),
                return_type: return_type.map(|rt| rt.to_string()),
            }),
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            RouteKind::Get(_) => HttpMethod::Get,
            RouteKind::Post => HttpMethod::Post,
            RouteKind::Put => HttpMethod::Put,
            RouteKind::Delete => HttpMethod::Delete,
        }
    }

    pub fn return_type(&self) -> Option<GetReturnType> {
        match self {
            RouteKind::Get(rt) => Some(*rt),
            _ => None,
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteKind::Get(rt) => write!(f, "get/{}", rt),
            other => write!(f, "{}", other.method()),
        }
    }
}

/// A selectable base directory: the alias shown to the user and used in import
/// paths, and the filesystem path it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootDir {
    /// Import alias, e.g. `@/features/`
    pub label: String,
    /// Path relative to the output root, e.g. `src/features`
    pub path: String,
}

impl RootDir {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }

    /// The preconfigured root directory options
    pub fn defaults() -> Vec<RootDir> {
        vec![
            RootDir::new("@/features/", "src/features"),
            RootDir::new("@/shared/features", "src/shared/features"),
            RootDir::new("@/", "src"),
        ]
    }
}

/// Everything needed to scaffold one feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Base directory the root directory path is relative to
    pub root_path: PathBuf,
    /// Selected root directory option
    pub root_dir: RootDir,
    /// Parent subdirectory segments below the root directory (may be empty)
    pub parent_dir: Vec<String>,
    /// Kebab-case feature name
    pub feature_name: String,
    pub http_method: HttpMethod,
    /// Present iff `http_method` is GET
    pub get_return_type: Option<GetReturnType>,
    /// Registry directories to emit
    pub selected_directories: BTreeSet<String>,
}

impl GenerationRequest {
    /// Registry key for this request
    pub fn route(&self) -> Result<RouteKind> {
        RouteKind::new(self.http_method, self.get_return_type)
    }

    /// On-disk directory the feature is generated into
    pub fn feature_dir(&self) -> PathBuf {
        let mut dir = self.root_path.clone();
        for segment in self.root_dir.path.split('/').filter(|s| !s.is_empty()) {
            dir.push(segment);
        }
        for segment in &self.parent_dir {
            dir.push(segment);
        }
        dir.push(&self.feature_name);
        dir
    }

    /// Logical import path of the feature, e.g. `@/features/orders/order-item`
    pub fn feature_path(&self) -> String {
        let parts = std::iter::once(self.root_dir.label.as_str())
            .chain(self.parent_dir.iter().map(String::as_str))
            .chain(std::iter::once(self.feature_name.as_str()));
        let joined = join_logical_path(parts);
        if self.root_dir.label.starts_with('/') {
            format!("/{}", joined)
        } else {
            joined
        }
    }

    /// Substitution values for this request's feature
    pub fn placeholders(&self) -> crate::placeholder::PlaceholderContext {
        crate::placeholder::PlaceholderContext {
            feature_path: self.feature_path(),
            feature_name_kebab: self.feature_name.clone(),
            feature_name_pascal: to_pascal_case(&self.feature_name),
            feature_name_camel: to_camel_case(&self.feature_name),
        }
    }
}
