//! Module (group) resolution and lifecycle
//!
//! Modules exist in two places: the explicit registry (`created_modules`) and
//! implicitly through the `module` field of every project. The resolved list is
//! the ordered, deduplicated union of both and is recomputed on every call.

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;
use tracing::debug;

use crate::core::entity::effective_module;
use crate::core::store::{module_members, AccessConfig, ProjectMap};
use crate::entities::Project;

/// Errors raised by module lifecycle operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("Module name cannot be empty")]
    EmptyName,

    #[error("Module name \"{0}\" is already in use")]
    DuplicateName(String),
}

/// Registry entries first (in registry order), then modules only referenced by
/// projects, in first-seen order. Empty module values are skipped.
pub fn resolve_groups(registry: &[String], projects: &ProjectMap) -> Vec<String> {
    let mut groups: IndexSet<String> = registry.iter().cloned().collect();
    for project in projects.values() {
        if !project.module.trim().is_empty() {
            groups.insert(project.module.clone());
        }
    }
    groups.into_iter().collect()
}

/// Resolved list for a whole snapshot
pub fn module_list(config: &AccessConfig) -> Vec<String> {
    resolve_groups(&config.created_modules, &config.custom_projects)
}

/// Registry extended with every module currently in use
pub fn sync_registry(config: &AccessConfig) -> AccessConfig {
    AccessConfig::new(config.custom_projects.clone(), module_list(config))
}

fn check_name(
    config: &AccessConfig,
    name: &str,
    editing: Option<&str>,
) -> Result<(), GroupError> {
    if name.trim().is_empty() {
        return Err(GroupError::EmptyName);
    }
    if editing != Some(name) && module_list(config).iter().any(|m| m == name) {
        return Err(GroupError::DuplicateName(name.to_string()));
    }
    Ok(())
}

/// Register a new, possibly empty, module
pub fn create_module(config: &AccessConfig, name: &str) -> Result<AccessConfig, GroupError> {
    let name = name.trim();
    check_name(config, name, None)?;

    let mut next = config.clone();
    next.created_modules.push(name.to_string());
    debug!(module = name, "created module");
    Ok(next)
}

/// Rename a module, relabelling every member and the registry entry in place
pub fn rename_module(
    config: &AccessConfig,
    old: &str,
    new: &str,
) -> Result<AccessConfig, GroupError> {
    let new = new.trim();
    check_name(config, new, Some(old))?;
    if old == new {
        return Ok(config.clone());
    }

    let old_module = effective_module(old);
    let mut next = config.clone();
    for project in next.custom_projects.values_mut() {
        if project.module_name() == old_module {
            project.module = new.to_string();
        }
    }
    for module in next.created_modules.iter_mut() {
        if *module == old {
            *module = new.to_string();
        }
    }
    debug!(from = old, to = new, "renamed module");
    Ok(next)
}

/// Delete a module together with every project filed under it.
///
/// Returns the new snapshot and the names of the removed projects. The caller
/// must drop `name` from any expanded-group UI state.
pub fn delete_module(config: &AccessConfig, name: &str) -> (AccessConfig, Vec<String>) {
    let module = effective_module(name);
    let mut next = config.clone();
    let removed: Vec<String> = config
        .custom_projects
        .values()
        .filter(|p| p.module_name() == module)
        .map(|p| p.name.clone())
        .collect();

    next.custom_projects.retain(|_, p| p.module_name() != module);
    next.created_modules.retain(|m| m != name);
    debug!(module = name, removed = removed.len(), "deleted module");
    (next, removed)
}

/// Members of every resolved module, registry modules first; projects with an
/// empty module are listed under the uncategorized module
pub fn group_projects(config: &AccessConfig) -> IndexMap<String, Vec<&Project>> {
    let mut groups: IndexMap<String, Vec<&Project>> = IndexMap::new();
    for module in &config.created_modules {
        groups.entry(module.clone()).or_default();
    }
    for project in config.custom_projects.values() {
        groups.entry(project.module_name().to_string()).or_default();
    }
    for (module, members) in groups.iter_mut() {
        *members = module_members(&config.custom_projects, effective_module(module));
    }
    groups
}
