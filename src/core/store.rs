//! Project store snapshot
//!
//! A snapshot pairs the project map (keyed by project name, insertion ordered)
//! with the registry of explicitly created modules. Every operation in the core
//! takes a snapshot by reference and returns a fresh one.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::entity::effective_module;
use crate::entities::Project;

/// Projects keyed by name, in insertion order
pub type ProjectMap = IndexMap<String, Project>;

/// Complete persisted state: projects plus the explicit module registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessConfig {
    #[serde(default)]
    pub custom_projects: ProjectMap,

    /// Modules created directly by the user, in creation order
    #[serde(default)]
    pub created_modules: Vec<String>,
}

impl AccessConfig {
    pub fn new(custom_projects: ProjectMap, created_modules: Vec<String>) -> Self {
        Self {
            custom_projects,
            created_modules,
        }
    }

    /// Build a snapshot from a list of projects (no registered modules)
    pub fn from_projects(projects: impl IntoIterator<Item = Project>) -> Self {
        Self {
            custom_projects: projects_to_map(projects),
            created_modules: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Project> {
        self.custom_projects.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.custom_projects.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.custom_projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.custom_projects.is_empty()
    }

    /// Replace the project map, keeping the registry
    pub fn with_projects(&self, custom_projects: ProjectMap) -> Self {
        Self {
            custom_projects,
            created_modules: self.created_modules.clone(),
        }
    }

    pub fn enabled_count(&self) -> usize {
        self.custom_projects.values().filter(|p| p.enabled).count()
    }
}

/// Key a list of projects by name; later duplicates replace earlier ones
pub fn projects_to_map(projects: impl IntoIterator<Item = Project>) -> ProjectMap {
    projects
        .into_iter()
        .map(|p| (p.name.clone(), p))
        .collect()
}

/// Projects of one module, sorted by display order with name as tie-break
pub fn module_members<'a>(projects: &'a ProjectMap, module: &str) -> Vec<&'a Project> {
    let module = effective_module(module);
    let mut members: Vec<&Project> = projects
        .values()
        .filter(|p| p.module_name() == module)
        .collect();
    members.sort_by(|a, b| {
        a.display_order()
            .cmp(&b.display_order())
            .then_with(|| a.name.cmp(&b.name))
    });
    members
}
