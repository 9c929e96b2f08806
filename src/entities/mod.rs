//! Entity type definitions

pub mod project;

pub use project::Project;
