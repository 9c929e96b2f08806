//! Behavior kinds and shared entity constants

use serde::{Deserialize, Serialize};

/// Module assigned to projects that do not name one
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Treatment applied to elements matched by a project's selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    #[default]
    Hide,
    Disable,
    Blur,
    Restrict,
}

impl Behavior {
    /// All behaviors in display order
    pub fn all() -> &'static [Behavior] {
        &[
            Behavior::Hide,
            Behavior::Disable,
            Behavior::Blur,
            Behavior::Restrict,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Behavior::Hide => "hide",
            Behavior::Disable => "disable",
            Behavior::Blur => "blur",
            Behavior::Restrict => "restrict",
        }
    }
}

impl std::fmt::Display for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Behavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hide" => Ok(Behavior::Hide),
            "disable" => Ok(Behavior::Disable),
            "blur" => Ok(Behavior::Blur),
            "restrict" => Ok(Behavior::Restrict),
            _ => Err(format!("Unknown behavior: {}", s)),
        }
    }
}

/// Resolve the module a project is filed under, falling back to [`UNCATEGORIZED`]
pub fn effective_module(module: &str) -> &str {
    if module.trim().is_empty() {
        UNCATEGORIZED
    } else {
        module
    }
}
