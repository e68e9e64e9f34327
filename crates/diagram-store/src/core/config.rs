//! Store configuration
//!
//! Defaults a fresh store starts from: the active tool, the title given to
//! untitled use cases, and how element ids are generated.

use crate::core::element::DEFAULT_USE_CASE_TITLE;
use crate::core::ids::IdStrategy;

/// Tool selected when a store is created or cleared
pub const DEFAULT_TOOL: &str = "select";

/// Configuration for a [`DiagramStore`](crate::store::DiagramStore)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Tool a new or cleared store starts with
    pub default_tool: String,
    /// Title used when a use case is added without one
    pub default_use_case_title: String,
    /// Id generator to build the store with
    pub id_strategy: IdStrategy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_tool: DEFAULT_TOOL.to_string(),
            default_use_case_title: DEFAULT_USE_CASE_TITLE.to_string(),
            id_strategy: IdStrategy::default(),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_tool(mut self, tool: impl Into<String>) -> Self {
        self.default_tool = tool.into();
        self
    }

    pub fn with_default_use_case_title(mut self, title: impl Into<String>) -> Self {
        self.default_use_case_title = title.into();
        self
    }

    pub fn with_id_strategy(mut self, id_strategy: IdStrategy) -> Self {
        self.id_strategy = id_strategy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.default_tool, "select");
        assert_eq!(config.default_use_case_title, "Use Case");
        assert_eq!(config.id_strategy, IdStrategy::Timestamp);
    }

    #[test]
    fn test_builder_overrides() {
        let config = StoreConfig::new()
            .with_default_tool("actor")
            .with_default_use_case_title("New Goal")
            .with_id_strategy(IdStrategy::Sequential);
        assert_eq!(config.default_tool, "actor");
        assert_eq!(config.default_use_case_title, "New Goal");
        assert_eq!(config.id_strategy, IdStrategy::Sequential);
    }
}
