//! Core module - snapshot model, ordering engine and collaborators

pub mod actions;
pub mod config;
pub mod entity;
pub mod groups;
pub mod message;
pub mod ordering;
pub mod stats;
pub mod store;
pub mod stylesheet;
pub mod transfer;
pub mod ui_state;
pub mod urlmatch;
pub mod validation;
pub mod workspace;

pub use actions::ActionError;
pub use config::Config;
pub use entity::{Behavior, UNCATEGORIZED};
pub use groups::{group_projects, resolve_groups, GroupError};
pub use message::{ApplyCoalescer, PageInfo, Request, Response};
pub use ordering::{move_to_module, normalize, reorder_within_module};
pub use stats::{statistics, Statistics};
pub use store::{AccessConfig, ProjectMap};
pub use transfer::{export_projects, import_projects, TransferError};
pub use ui_state::{UiState, ViewMode};
pub use validation::{validate, CssSelectorSyntax, SelectorSyntax, ValidationError};
pub use workspace::{Persistence, Workspace, WorkspaceError};
