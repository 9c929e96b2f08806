//! Workspace discovery and persistence
//!
//! A workspace is any directory holding a `.pagewarden/` directory:
//!
//! ```text
//! .pagewarden/
//!   config.yaml      workspace configuration layer
//!   state.json       the committed snapshot (AccessConfig)
//!   ui.json          view mode and expanded groups
//!   applied.sha256   fingerprint of the last applied request
//! ```
//!
//! Every write goes to a temporary sibling first and is renamed into place,
//! so readers only ever observe complete files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::core::config::Config;
use crate::core::store::AccessConfig;
use crate::core::ui_state::UiState;

/// Name of the workspace marker directory
pub const WORKSPACE_DIR: &str = ".pagewarden";

const STATE_FILE: &str = "state.json";
const UI_FILE: &str = "ui.json";
const APPLIED_FILE: &str = "applied.sha256";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("not a pagewarden workspace (no .pagewarden in {0} or any parent); run `pagewarden init`")]
    NotFound(PathBuf),

    #[error("workspace already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl WorkspaceError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Load/save of the committed snapshot
pub trait Persistence {
    /// Current snapshot; the empty snapshot when nothing was saved yet
    fn load(&self) -> Result<AccessConfig, WorkspaceError>;

    fn save(&self, config: &AccessConfig) -> Result<(), WorkspaceError>;
}

#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Find the workspace containing the current directory
    pub fn discover() -> Result<Self, WorkspaceError> {
        let cwd = std::env::current_dir().map_err(|e| WorkspaceError::io(Path::new("."), e))?;
        Self::discover_from(&cwd)
    }

    /// Walk up from `start` until a directory holding `.pagewarden/` is found
    pub fn discover_from(start: &Path) -> Result<Self, WorkspaceError> {
        start
            .ancestors()
            .find(|dir| dir.join(WORKSPACE_DIR).is_dir())
            .map(|dir| {
                debug!(root = %dir.display(), "discovered workspace");
                Self {
                    root: dir.to_path_buf(),
                }
            })
            .ok_or_else(|| WorkspaceError::NotFound(start.to_path_buf()))
    }

    /// Open the workspace rooted exactly at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, WorkspaceError> {
        let root = root.into();
        if root.join(WORKSPACE_DIR).is_dir() {
            Ok(Self { root })
        } else {
            Err(WorkspaceError::NotFound(root))
        }
    }

    /// Create `.pagewarden/` under `root` with a config template and an empty snapshot
    pub fn init(root: impl Into<PathBuf>) -> Result<Self, WorkspaceError> {
        let root = root.into();
        let dir = root.join(WORKSPACE_DIR);
        if dir.exists() {
            return Err(WorkspaceError::AlreadyInitialized(root));
        }
        fs::create_dir_all(&dir).map_err(|e| WorkspaceError::io(&dir, e))?;

        let workspace = Self { root };
        write_atomic(&workspace.config_path(), Config::template().as_bytes())?;
        workspace.save(&AccessConfig::default())?;
        Ok(workspace)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR)
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir().join(STATE_FILE)
    }

    pub fn ui_path(&self) -> PathBuf {
        self.dir().join(UI_FILE)
    }

    pub fn applied_path(&self) -> PathBuf {
        self.dir().join(APPLIED_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir().join(CONFIG_FILE)
    }

    /// Effective configuration for this workspace
    pub fn config(&self) -> Config {
        Config::load(Some(&self.config_path()))
    }

    pub fn load_ui(&self) -> Result<UiState, WorkspaceError> {
        read_json(&self.ui_path())
    }

    pub fn save_ui(&self, state: &UiState) -> Result<(), WorkspaceError> {
        write_json(&self.ui_path(), state)
    }

    /// Fingerprint of the last successfully applied request, if any
    pub fn load_applied(&self) -> Result<Option<String>, WorkspaceError> {
        let path = self.applied_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| WorkspaceError::io(&path, e))?;
        let fingerprint = content.trim();
        Ok((!fingerprint.is_empty()).then(|| fingerprint.to_string()))
    }

    pub fn save_applied(&self, fingerprint: &str) -> Result<(), WorkspaceError> {
        write_atomic(&self.applied_path(), format!("{}\n", fingerprint).as_bytes())
    }
}

impl Persistence for Workspace {
    fn load(&self) -> Result<AccessConfig, WorkspaceError> {
        read_json(&self.state_path())
    }

    fn save(&self, config: &AccessConfig) -> Result<(), WorkspaceError> {
        debug!(projects = config.len(), "saving snapshot");
        write_json(&self.state_path(), config)
    }
}

fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, WorkspaceError> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path).map_err(|e| WorkspaceError::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| WorkspaceError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), WorkspaceError> {
    let mut json = serde_json::to_string_pretty(value).map_err(|source| WorkspaceError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    json.push('\n');
    write_atomic(path, json.as_bytes())
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), WorkspaceError> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents).map_err(|e| WorkspaceError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| WorkspaceError::io(path, e))
}
