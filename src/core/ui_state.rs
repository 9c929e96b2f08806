//! Presentation state: view mode and expanded module groups

use serde::{Deserialize, Serialize};

/// How project listings are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    List,
    #[default]
    Group,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::List => write!(f, "list"),
            ViewMode::Group => write!(f, "group"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiState {
    pub view_mode: ViewMode,
    pub expanded_groups: Vec<String>,
}

impl UiState {
    pub fn is_expanded(&self, group: &str) -> bool {
        self.expanded_groups.iter().any(|g| g == group)
    }

    pub fn expand(&mut self, group: &str) {
        if !self.is_expanded(group) {
            self.expanded_groups.push(group.to_string());
        }
    }

    pub fn collapse(&mut self, group: &str) {
        self.expanded_groups.retain(|g| g != group);
    }

    /// Drop expanded groups that are not in `groups`. Returns true when
    /// anything was removed.
    pub fn prune(&mut self, groups: &[String]) -> bool {
        let before = self.expanded_groups.len();
        self.expanded_groups.retain(|g| groups.contains(g));
        self.expanded_groups.len() != before
    }

    /// Follow a module rename, keeping the group's position
    pub fn rename_group(&mut self, old: &str, new: &str) {
        for group in self.expanded_groups.iter_mut() {
            if *group == old {
                *group = new.to_string();
            }
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded_groups.clear();
    }
}
