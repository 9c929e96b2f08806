//! Pagewarden: per-page element access control
//!
//! Projects name CSS selectors to hide, disable, blur or restrict on matching
//! pages. Projects are grouped into modules with an explicit order; the core
//! keeps that ordering consistent across every mutation.

pub mod cli;
pub mod core;
pub mod entities;
