//! Per-module ordering: normalization, intra-module reorder and cross-module move
//!
//! Every module's projects carry an `order` value. After normalization the
//! values within a module are exactly `0..n`, assigned by sorting on the
//! existing order (missing sorts last) with the project name as tie-break.
//!
//! Reorder and move treat a missing order as 0, and degrade to a no-op when the
//! referenced project or index does not exist. The `try_*` forms return `None`
//! in that case so callers can tell "nothing happened" from "it worked".

use std::cmp::Ordering;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::entity::effective_module;
use crate::core::groups::sync_registry;
use crate::core::store::{module_members, AccessConfig, ProjectMap};
use crate::entities::Project;

fn normalize_cmp(a: &Project, b: &Project) -> Ordering {
    let order_a = a.order.unwrap_or(i64::MAX);
    let order_b = b.order.unwrap_or(i64::MAX);
    order_a.cmp(&order_b).then_with(|| a.name.cmp(&b.name))
}

/// Assign `0..n` to the given names, in sequence
fn assign_sequence(projects: &mut ProjectMap, names: &[String]) {
    for (index, name) in names.iter().enumerate() {
        if let Some(project) = projects.get_mut(name) {
            project.order = Some(index as i64);
        }
    }
}

fn member_names(projects: &ProjectMap, module: &str) -> Vec<String> {
    module_members(projects, module)
        .into_iter()
        .map(|p| p.name.clone())
        .collect()
}

/// Re-derive contiguous, deterministic order values for every module
pub fn normalize(projects: &ProjectMap) -> ProjectMap {
    let mut by_module: IndexMap<&str, Vec<&Project>> = IndexMap::new();
    for project in projects.values() {
        by_module.entry(project.module_name()).or_default().push(project);
    }

    let mut sequences: Vec<Vec<String>> = Vec::with_capacity(by_module.len());
    for (_, mut members) in by_module {
        members.sort_by(|a, b| normalize_cmp(a, b));
        sequences.push(members.into_iter().map(|p| p.name.clone()).collect());
    }

    let mut next = projects.clone();
    for names in &sequences {
        assign_sequence(&mut next, names);
    }
    next
}

/// True when normalizing would not change any order value
pub fn is_normalized(projects: &ProjectMap) -> bool {
    normalize(projects) == *projects
}

/// Order a newly added project receives in `module`: one past the highest
/// existing order, or 0 for an empty module
pub fn next_order(projects: &ProjectMap, module: &str) -> i64 {
    module_members(projects, module)
        .iter()
        .map(|p| p.display_order())
        .max()
        .map_or(0, |max| max + 1)
}

/// Close the gaps left in `module` after a member was removed or moved out
pub fn close_gaps(projects: &ProjectMap, module: &str) -> ProjectMap {
    let mut next = projects.clone();
    let names = member_names(projects, module);
    assign_sequence(&mut next, &names);
    next
}

/// Move the project at `source_index` to `target_index` within `module`,
/// using list (splice) semantics. `None` when either index is out of range.
pub fn try_reorder_within_module(
    projects: &ProjectMap,
    module: &str,
    source_index: usize,
    target_index: usize,
) -> Option<ProjectMap> {
    let mut names = member_names(projects, module);
    if source_index >= names.len() || target_index >= names.len() {
        warn!(
            module,
            source_index,
            target_index,
            members = names.len(),
            "reorder index out of range, ignoring"
        );
        return None;
    }

    let moved = names.remove(source_index);
    names.insert(target_index, moved);

    let mut next = projects.clone();
    assign_sequence(&mut next, &names);
    debug!(module, source_index, target_index, "reordered module");
    Some(next)
}

/// [`try_reorder_within_module`], returning the input unchanged on a no-op
pub fn reorder_within_module(
    projects: &ProjectMap,
    module: &str,
    source_index: usize,
    target_index: usize,
) -> ProjectMap {
    try_reorder_within_module(projects, module, source_index, target_index)
        .unwrap_or_else(|| projects.clone())
}

/// Move a project into `target_module` at `target_index` (end of the module
/// when omitted, clamped to the end when too large). The source module is
/// compacted and the target module's members at or after the insertion point
/// shift down by one. `None` when the project does not exist.
pub fn try_move_to_module(
    projects: &ProjectMap,
    project_name: &str,
    target_module: &str,
    target_index: Option<usize>,
) -> Option<ProjectMap> {
    let Some(project) = projects.get(project_name) else {
        warn!(project = project_name, "move of unknown project, ignoring");
        return None;
    };
    let source_module = project.module_name().to_string();
    let target_module = effective_module(target_module);

    let mut next = projects.clone();
    if let Some(moved) = next.get_mut(project_name) {
        moved.module = target_module.to_string();
    }

    // Close the gap in the source module
    let remaining: Vec<String> = member_names(&next, &source_module)
        .into_iter()
        .filter(|name| name != project_name)
        .collect();
    assign_sequence(&mut next, &remaining);

    // Make room in the target module
    let existing: Vec<String> = member_names(&next, target_module)
        .into_iter()
        .filter(|name| name != project_name)
        .collect();
    let insert_index = target_index.unwrap_or(existing.len()).min(existing.len());

    for (index, name) in existing.iter().enumerate() {
        let order = if index < insert_index { index } else { index + 1 };
        if let Some(project) = next.get_mut(name) {
            project.order = Some(order as i64);
        }
    }
    if let Some(moved) = next.get_mut(project_name) {
        moved.order = Some(insert_index as i64);
    }

    debug!(
        project = project_name,
        from = %source_module,
        to = target_module,
        index = insert_index,
        "moved project"
    );
    Some(next)
}

/// [`try_move_to_module`], returning the input unchanged on a no-op
pub fn move_to_module(
    projects: &ProjectMap,
    project_name: &str,
    target_module: &str,
    target_index: Option<usize>,
) -> ProjectMap {
    try_move_to_module(projects, project_name, target_module, target_index)
        .unwrap_or_else(|| projects.clone())
}

/// Resolve a drag gesture that dropped `active` onto `over`.
///
/// Same module: reorder between the two positions. Different modules: move
/// `active` into `over`'s module at `over`'s position. The registry is then
/// extended with every module in use. `None` when either project is unknown or
/// the project was dropped onto itself.
pub fn try_drag_end(config: &AccessConfig, active: &str, over: &str) -> Option<AccessConfig> {
    if active == over {
        return None;
    }
    let active_project = config.get(active)?;
    let over_project = config.get(over)?;

    let source_module = active_project.module_name();
    let target_module = over_project.module_name();
    let target_members = member_names(&config.custom_projects, target_module);
    let target_index = target_members.iter().position(|name| name == over)?;

    let projects = if source_module == target_module {
        let source_index = target_members.iter().position(|name| name == active)?;
        try_reorder_within_module(
            &config.custom_projects,
            source_module,
            source_index,
            target_index,
        )?
    } else {
        try_move_to_module(
            &config.custom_projects,
            active,
            target_module,
            Some(target_index),
        )?
    };

    Some(sync_registry(&config.with_projects(projects)))
}

/// [`try_drag_end`], returning the input unchanged on a no-op
pub fn drag_end(config: &AccessConfig, active: &str, over: &str) -> AccessConfig {
    try_drag_end(config, active, over).unwrap_or_else(|| config.clone())
}
