//! Shared utilities for CLI commands

use miette::Result;
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::core::groups::group_projects;
use crate::core::store::AccessConfig;
use crate::core::ui_state::UiState;
use crate::core::workspace::{Persistence, Workspace};

/// Open the workspace named by `--root` / `PAGEWARDEN_ROOT`, or discover it
/// from the current directory
pub fn open_workspace(global: &GlobalOpts) -> Result<Workspace> {
    match &global.root {
        Some(root) => Workspace::open(root),
        None => Workspace::discover(),
    }
    .map_err(|e| miette::miette!("{}", e))
}

/// Load the committed snapshot
pub fn load_snapshot(workspace: &Workspace) -> Result<AccessConfig> {
    workspace.load().map_err(|e| miette::miette!("{}", e))
}

/// Persist `next` when it differs from `before`. Expanded groups that no
/// longer resolve are pruned afterwards. Returns whether anything was written.
pub fn commit(workspace: &Workspace, before: &AccessConfig, next: &AccessConfig) -> Result<bool> {
    if !save_if_changed(workspace, before, next)? {
        return Ok(false);
    }
    let ui = workspace.load_ui().map_err(|e| miette::miette!("{}", e))?;
    store_ui(workspace, ui, next, false)?;
    Ok(true)
}

/// Like [`commit`], but also stores `ui` once the snapshot is on disk
pub fn commit_with_ui(
    workspace: &Workspace,
    before: &AccessConfig,
    next: &AccessConfig,
    ui: UiState,
) -> Result<bool> {
    let changed = save_if_changed(workspace, before, next)?;
    store_ui(workspace, ui, next, true)?;
    Ok(changed)
}

fn save_if_changed(
    workspace: &Workspace,
    before: &AccessConfig,
    next: &AccessConfig,
) -> Result<bool> {
    if before == next {
        debug!("snapshot unchanged, nothing to save");
        return Ok(false);
    }
    workspace.save(next).map_err(|e| miette::miette!("{}", e))?;
    Ok(true)
}

fn store_ui(
    workspace: &Workspace,
    mut ui: UiState,
    config: &AccessConfig,
    force: bool,
) -> Result<()> {
    let groups: Vec<String> = group_projects(config).into_keys().collect();
    if ui.prune(&groups) || force {
        workspace
            .save_ui(&ui)
            .map_err(|e| miette::miette!("{}", e))?;
    }
    Ok(())
}
