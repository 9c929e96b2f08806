//! Configuration layering
//!
//! Values are merged from, lowest priority first:
//! 1. built-in defaults
//! 2. the user config (`<config dir>/pagewarden/config.yaml`)
//! 3. the workspace config (`.pagewarden/config.yaml`)
//!
//! Layers are partial: a key missing from a file leaves the lower layer's value.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::entity::Behavior;
use crate::core::message::DEFAULT_LANG;

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Behavior given to new projects when none is specified
    pub default_behavior: Behavior,

    /// Language tag sent with apply requests
    pub language: String,

    /// Ask before destructive commands (clear, module delete)
    pub confirm_destructive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_behavior: Behavior::Hide,
            language: DEFAULT_LANG.to_string(),
            confirm_destructive: true,
        }
    }
}

/// One configuration file; every key optional
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigLayer {
    default_behavior: Option<Behavior>,
    language: Option<String>,
    confirm_destructive: Option<bool>,
}

impl Config {
    /// Load defaults, then the user config, then the workspace config at `workspace_config`
    pub fn load(workspace_config: Option<&Path>) -> Self {
        let mut config = Self::default();
        if let Some(path) = Self::user_config_path() {
            config.apply_file(&path);
        }
        if let Some(path) = workspace_config {
            config.apply_file(path);
        }
        config
    }

    /// Location of the per-user config file
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "pagewarden").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn apply_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        let layer = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_yml::from_str::<Option<ConfigLayer>>(&content).map_err(|e| e.to_string())
            });
        match layer {
            Ok(Some(layer)) => {
                debug!(path = %path.display(), "loaded config layer");
                self.merge(layer);
            }
            Ok(None) => {}
            Err(e) => warn!(path = %path.display(), error = %e, "ignoring unreadable config"),
        }
    }

    fn merge(&mut self, layer: ConfigLayer) {
        if let Some(behavior) = layer.default_behavior {
            self.default_behavior = behavior;
        }
        if let Some(language) = layer.language {
            self.language = language;
        }
        if let Some(confirm) = layer.confirm_destructive {
            self.confirm_destructive = confirm;
        }
    }

    /// Contents written by `init`
    pub fn template() -> String {
        format!(
            "# Pagewarden workspace configuration\n\
             # default_behavior: hide | disable | blur | restrict\n\
             default_behavior: {}\n\
             language: {}\n\
             confirm_destructive: {}\n",
            Behavior::Hide,
            DEFAULT_LANG,
            true
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_behavior, Behavior::Hide);
        assert_eq!(config.language, "en");
        assert!(config.confirm_destructive);
    }

    #[test]
    fn test_partial_layer_overrides_only_given_keys() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "default_behavior: blur\n").unwrap();

        let mut config = Config::default();
        config.apply_file(&path);
        assert_eq!(config.default_behavior, Behavior::Blur);
        assert_eq!(config.language, "en");
    }

    #[test]
    fn test_invalid_layer_is_ignored() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "default_behavior: [nope\n").unwrap();

        let mut config = Config::default();
        config.apply_file(&path);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_template_parses() {
        let layer: ConfigLayer = serde_yml::from_str(&Config::template()).unwrap();
        assert_eq!(layer.default_behavior, Some(Behavior::Hide));
        assert_eq!(layer.confirm_destructive, Some(true));
    }
}
