use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::metrics::{MetricError, MetricResult};

/// Factory configuration used when resolving metric function names.
///
/// - `case_insensitive_names` makes `SUM(x)` resolve like `sum(x)`.
/// - `aliases` maps extra function names onto registered ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Resolve function names ignoring ASCII case
    pub case_insensitive_names: bool,
    /// alias -> registered function name
    pub aliases: IndexMap<String, String>,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self { case_insensitive_names: true, aliases: IndexMap::new() }
    }
}

impl FactoryConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-case function names, no aliases.
    pub fn strict() -> Self {
        Self { case_insensitive_names: false, ..Default::default() }
    }

    pub fn with_alias(mut self, alias: &str, function_name: &str) -> Self {
        self.aliases.insert(alias.to_string(), function_name.to_string());
        self
    }

    pub fn from_json_str(text: &str) -> MetricResult<Self> {
        serde_json::from_str(text).map_err(|e| MetricError::Config(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> MetricResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| MetricError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }
}
