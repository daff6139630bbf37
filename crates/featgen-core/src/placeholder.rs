//! Placeholder protocol shared by template bodies and output file name patterns.
//!
//! Four literal tokens are recognised. Each is replaced globally and verbatim;
//! the tokens are textually disjoint, so substitution order does not matter.

use serde::Serialize;

pub const FEATURE_PATH: &str = "{{featurePath}}";
pub const FEATURE_NAME_KEBAB: &str = "{{feature-name}}";
pub const FEATURE_NAME_PASCAL: &str = "{{FeatureName}}";
pub const FEATURE_NAME_CAMEL: &str = "{{featureName}}";

/// Values substituted for the four placeholder tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderContext {
    /// Full logical import path of the feature
    pub feature_path: String,
    pub feature_name_kebab: String,
    pub feature_name_pascal: String,
    pub feature_name_camel: String,
}

impl PlaceholderContext {
    /// Replace every placeholder occurrence in `text`.
    pub fn apply(&self, text: &str) -> String {
        text.replace(FEATURE_PATH, &self.feature_path)
            .replace(FEATURE_NAME_KEBAB, &self.feature_name_kebab)
            .replace(FEATURE_NAME_PASCAL, &self.feature_name_pascal)
            .replace(FEATURE_NAME_CAMEL, &self.feature_name_camel)
    }
}
