//! Project-level actions: add, update, copy, delete, toggles and bulk clear
//!
//! Each action takes the current snapshot and returns a new one; the input is
//! never modified. Validation failures leave the caller's snapshot untouched.

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::entity::{Behavior, UNCATEGORIZED};
use crate::core::ordering::{close_gaps, next_order, normalize};
use crate::core::store::{AccessConfig, ProjectMap};
use crate::core::validation::{validate, SelectorSyntax, ValidationError};
use crate::entities::Project;

/// Errors returned by project actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Project \"{0}\" not found")]
    NotFound(String),
}

fn check_name(projects: &ProjectMap, name: &str, exclude: Option<&str>) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if exclude != Some(name) && projects.contains_key(name) {
        return Err(ValidationError::DuplicateName(name.to_string()));
    }
    Ok(())
}

fn fill_module(project: &mut Project) {
    if project.module.trim().is_empty() {
        project.module = UNCATEGORIZED.to_string();
    }
}

/// Add a new project at the end of its module
pub fn add_project(
    config: &AccessConfig,
    mut project: Project,
    syntax: &dyn SelectorSyntax,
) -> Result<AccessConfig, ActionError> {
    fill_module(&mut project);
    project.order = Some(next_order(&config.custom_projects, &project.module));

    check_name(&config.custom_projects, &project.name, None)?;
    validate(&project, syntax)?;

    let mut next = config.clone();
    debug!(project = %project.name, module = %project.module, order = ?project.order, "added project");
    next.custom_projects.insert(project.name.clone(), project);
    Ok(next)
}

/// Replace the project stored as `original_name` with `project`.
///
/// A module change appends the project to its new module and compacts the old
/// one; otherwise the stored order is kept. A name change removes the old key
/// and inserts the new one in the same step.
pub fn update_project(
    config: &AccessConfig,
    original_name: &str,
    mut project: Project,
    syntax: &dyn SelectorSyntax,
) -> Result<AccessConfig, ActionError> {
    let Some(original) = config.get(original_name) else {
        return Err(ActionError::NotFound(original_name.to_string()));
    };
    fill_module(&mut project);

    let module_changed = original.module_name() != project.module;
    let old_module = original.module_name().to_string();

    if module_changed {
        let mut others = config.custom_projects.clone();
        others.shift_remove(original_name);
        project.order = Some(next_order(&others, &project.module));
    } else {
        project.order = Some(original.display_order());
    }

    check_name(&config.custom_projects, &project.name, Some(original_name))?;
    validate(&project, syntax)?;

    let mut projects = config.custom_projects.clone();
    if project.name != original_name {
        projects.shift_remove(original_name);
    }
    let new_name = project.name.clone();
    projects.insert(new_name.clone(), project);

    if module_changed {
        projects = close_gaps(&projects, &old_module);
    }

    debug!(from = original_name, to = %new_name, module_changed, "updated project");
    Ok(config.with_projects(projects))
}

/// Name for a copy of `name`: "<name> Copy", then "<name> Copy 1", "<name> Copy 2", ...
pub fn copy_name(projects: &ProjectMap, name: &str) -> String {
    let candidate = format!("{} Copy", name);
    if !projects.contains_key(&candidate) {
        return candidate;
    }
    (1..)
        .map(|n| format!("{} Copy {}", name, n))
        .find(|candidate| !projects.contains_key(candidate))
        .unwrap_or(candidate)
}

/// Duplicate a project under a free name; the copy starts disabled and keeps
/// the source order until the next normalization.
pub fn copy_project(config: &AccessConfig, name: &str) -> Result<(AccessConfig, String), ActionError> {
    let Some(source) = config.get(name) else {
        return Err(ActionError::NotFound(name.to_string()));
    };

    let mut copy = source.clone();
    copy.name = copy_name(&config.custom_projects, name);
    copy.enabled = false;

    let copy_name = copy.name.clone();
    let mut next = config.clone();
    next.custom_projects.insert(copy_name.clone(), copy);
    debug!(source = name, copy = %copy_name, "copied project");
    Ok((next, copy_name))
}

/// Remove a project; siblings keep their order until the next normalization.
/// `None` when the project does not exist.
pub fn try_delete_project(config: &AccessConfig, name: &str) -> Option<AccessConfig> {
    let mut next = config.clone();
    if next.custom_projects.shift_remove(name).is_none() {
        warn!(project = name, "delete of unknown project, ignoring");
        return None;
    }
    debug!(project = name, "deleted project");
    Some(next)
}

pub fn delete_project(config: &AccessConfig, name: &str) -> AccessConfig {
    try_delete_project(config, name).unwrap_or_else(|| config.clone())
}

/// Set the enabled flag of every named project, skipping unknown names
pub fn batch_toggle(config: &AccessConfig, names: &[String], enabled: bool) -> AccessConfig {
    let mut next = config.clone();
    for name in names {
        match next.custom_projects.get_mut(name) {
            Some(project) => project.enabled = enabled,
            None => warn!(project = %name, "toggle of unknown project, ignoring"),
        }
    }
    next
}

pub fn toggle_project(config: &AccessConfig, name: &str, enabled: bool) -> AccessConfig {
    batch_toggle(config, &[name.to_string()], enabled)
}

/// Change the behavior of one project; unknown names are ignored
pub fn set_behavior(config: &AccessConfig, name: &str, behavior: Behavior) -> AccessConfig {
    let mut next = config.clone();
    match next.custom_projects.get_mut(name) {
        Some(project) => project.behavior = behavior,
        None => warn!(project = name, "behavior change of unknown project, ignoring"),
    }
    next
}

/// Merge imported projects over the current ones (imported names win), then
/// normalize orders
pub fn merge_imported(config: &AccessConfig, imported: ProjectMap) -> AccessConfig {
    let mut projects = config.custom_projects.clone();
    projects.extend(imported);
    config.with_projects(normalize(&projects))
}

/// Drop every project and every registered module
pub fn clear_all(_config: &AccessConfig) -> AccessConfig {
    AccessConfig::default()
}
