//! CLI command implementations

pub mod apply;
pub mod clear;
pub mod completions;
pub mod css;
pub mod export;
pub mod import;
pub mod init;
pub mod module;
pub mod normalize;
pub mod project;
pub mod stats;
pub mod ui;
pub mod utils;
pub mod validate;
