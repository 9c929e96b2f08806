//! Project entity type - a named selector rule filed under a module

use serde::{Deserialize, Serialize};

use crate::core::entity::{effective_module, Behavior};

/// A named rule binding a selector list to a behavior, module and URL pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique key within the store
    pub name: String,

    /// Free-form description (advisory, at most 200 characters)
    #[serde(default)]
    pub description: String,

    /// Permission code; may collide across projects
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code: String,

    /// Module (group) this project belongs to
    #[serde(default)]
    pub module: String,

    /// One or more selectors separated by commas
    #[serde(default)]
    pub selector: String,

    /// Whether the behavior is currently applied
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub behavior: Behavior,

    /// Regular expression tested against page URLs; empty matches every page
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url_pattern: String,

    /// Position within the module, smaller first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

fn default_enabled() -> bool {
    true
}

impl Project {
    /// Create an enabled project hiding `selector`, filed under `module`
    pub fn new(
        name: impl Into<String>,
        module: impl Into<String>,
        selector: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            code: String::new(),
            module: module.into(),
            selector: selector.into(),
            enabled: true,
            behavior: Behavior::default(),
            url_pattern: String::new(),
            order: None,
        }
    }

    /// Builder-style setter for the order value
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    /// Builder-style setter for the behavior
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Builder-style setter for the URL pattern
    pub fn with_url_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.url_pattern = pattern.into();
        self
    }

    /// Module used for grouping (never empty)
    pub fn module_name(&self) -> &str {
        effective_module(&self.module)
    }

    /// Order for display and drag operations, missing counts as 0
    pub fn display_order(&self) -> i64 {
        self.order.unwrap_or(0)
    }

    /// Selector expressions, split on commas, trimmed, empties dropped
    pub fn selectors(&self) -> Vec<&str> {
        parse_selectors(&self.selector)
    }
}

/// Split a selector string on commas into trimmed, non-empty selectors
pub fn parse_selectors(selector: &str) -> Vec<&str> {
    selector
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
