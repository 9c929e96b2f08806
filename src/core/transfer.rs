//! Import/export document codec
//!
//! Exports are versioned:
//!
//! ```json
//! {
//!   "_metadata": { "version": "1.0.0", "exportDate": "...", "projectCount": 2 },
//!   "projects": { "<name>": { "description": "", "code": "", ... } }
//! }
//! ```
//!
//! Imports also accept the legacy shape, a bare map from project name to the
//! same per-project fields. Missing fields receive defaults; any structural
//! problem rejects the whole document.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::core::entity::{Behavior, UNCATEGORIZED};
use crate::core::store::ProjectMap;
use crate::entities::Project;

/// Version written into `_metadata.version`
pub const EXPORT_VERSION: &str = "1.0.0";

/// Errors raised while reading an import document
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Invalid import format: {0}")]
    InvalidFormat(String),

    #[error("Failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportMetadata {
    version: &'static str,
    export_date: String,
    project_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportedProject<'a> {
    description: &'a str,
    code: &'a str,
    module: &'a str,
    selector: &'a str,
    behavior: Behavior,
    url_pattern: &'a str,
    enabled: bool,
    order: i64,
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    #[serde(rename = "_metadata")]
    metadata: ExportMetadata,
    projects: IndexMap<&'a str, ExportedProject<'a>>,
}

/// Serialize projects into a versioned export document (pretty JSON)
pub fn export_projects(projects: &ProjectMap, exported_at: DateTime<Utc>) -> Result<String, TransferError> {
    let exported: IndexMap<&str, ExportedProject> = projects
        .values()
        .map(|p| {
            (
                p.name.as_str(),
                ExportedProject {
                    description: &p.description,
                    code: &p.code,
                    module: p.module_name(),
                    selector: &p.selector,
                    behavior: p.behavior,
                    url_pattern: &p.url_pattern,
                    enabled: p.enabled,
                    order: p.display_order(),
                },
            )
        })
        .collect();

    let document = ExportDocument {
        metadata: ExportMetadata {
            version: EXPORT_VERSION,
            export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            project_count: exported.len(),
        },
        projects: exported,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

fn string_field(data: &Map<String, Value>, key: &str, default: &str) -> String {
    match data.get(key).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

fn project_from_value(name: &str, value: &Value) -> Result<Project, TransferError> {
    let Some(data) = value.as_object() else {
        return Err(TransferError::InvalidFormat(format!(
            "project \"{}\" is not an object",
            name
        )));
    };

    let behavior = match data.get("behavior").and_then(Value::as_str) {
        None | Some("") => Behavior::default(),
        Some(s) => s
            .parse()
            .map_err(|e: String| TransferError::InvalidFormat(format!("project \"{}\": {}", name, e)))?,
    };

    Ok(Project {
        name: name.to_string(),
        description: string_field(data, "description", ""),
        code: string_field(data, "code", ""),
        module: string_field(data, "module", UNCATEGORIZED),
        selector: string_field(data, "selector", ""),
        enabled: data.get("enabled").and_then(Value::as_bool).unwrap_or(true),
        behavior,
        url_pattern: string_field(data, "urlPattern", ""),
        order: Some(data.get("order").and_then(Value::as_i64).unwrap_or(0)),
    })
}

/// Parse an export document (versioned or legacy) into projects
pub fn import_projects(content: &str) -> Result<ProjectMap, TransferError> {
    let document: Value = serde_json::from_str(content)
        .map_err(|e| TransferError::InvalidFormat(e.to_string()))?;
    let Some(root) = document.as_object() else {
        return Err(TransferError::InvalidFormat("document is not an object".to_string()));
    };

    let entries = match (root.get("_metadata"), root.get("projects")) {
        (Some(metadata), Some(Value::Object(projects))) => {
            debug!(
                count = ?metadata.get("projectCount"),
                exported = ?metadata.get("exportDate"),
                "importing versioned document"
            );
            projects
        }
        (Some(_), Some(_)) => {
            return Err(TransferError::InvalidFormat("\"projects\" is not an object".to_string()));
        }
        _ => root,
    };

    let mut projects = ProjectMap::with_capacity(entries.len());
    for (name, value) in entries {
        projects.insert(name.clone(), project_from_value(name, value)?);
    }
    Ok(projects)
}
