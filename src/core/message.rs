//! Messages exchanged with the page-side collaborator
//!
//! Requests and responses are tagged by `type` and validated when decoded, so
//! nothing untyped reaches the core. Repeated apply requests are coalesced by
//! [`ApplyCoalescer`], which the messaging side owns and persists.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::store::{AccessConfig, ProjectMap};

/// Language used when a request does not carry one
pub const DEFAULT_LANG: &str = "en";

/// Request sent to the page-side collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    /// Push a committed snapshot and language tag to the page
    ApplyAccessControl {
        config: AccessConfig,
        #[serde(default = "default_lang")]
        lang: String,
    },

    /// Ask the page for a match summary, optionally against a given snapshot
    GetPageInfo {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        config: Option<AccessConfig>,
    },
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

/// Acknowledgement for an apply request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,

    /// Another apply was in flight
    #[serde(default, skip_serializing_if = "is_false")]
    pub skipped: bool,

    /// The same payload was already applied
    #[serde(default, skip_serializing_if = "is_false")]
    pub cached: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Response {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn cached() -> Self {
        Self {
            success: true,
            cached: true,
            ..Default::default()
        }
    }

    pub fn skipped() -> Self {
        Self {
            success: true,
            skipped: true,
            ..Default::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Per-project entry in a page match summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProject {
    pub name: String,
    #[serde(default)]
    pub selector: String,
    pub element_count: u64,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub behavior: String,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_matches: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_pattern: Option<String>,
}

/// Read-only page match summary reported by the page-side collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub projects: Vec<PageProject>,
    #[serde(default)]
    pub total_element_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_matching_element_count: Option<u64>,
    #[serde(default)]
    pub configured_project_count: u64,
    #[serde(default)]
    pub enabled_project_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_matching_project_count: Option<u64>,
}

impl PageInfo {
    /// Element count reported for a project, 0 when absent
    pub fn element_count(&self, project_name: &str) -> u64 {
        self.projects
            .iter()
            .find(|p| p.name == project_name)
            .map_or(0, |p| p.element_count)
    }
}

#[derive(Serialize)]
struct ApplyKey<'a> {
    projects: &'a ProjectMap,
    lang: &'a str,
}

/// SHA-256 (hex) of the part of an apply request that affects the page
pub fn apply_fingerprint(config: &AccessConfig, lang: &str) -> String {
    let key = ApplyKey {
        projects: &config.custom_projects,
        lang,
    };
    // Serializing plain data into a Vec cannot fail
    let bytes = serde_json::to_vec(&key).unwrap_or_default();
    let digest = Sha256::digest(&bytes);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Request-coalescing state for apply requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyCoalescer {
    last_applied: Option<String>,
    in_flight: bool,
}

impl ApplyCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previously persisted fingerprint
    pub fn with_last_applied(fingerprint: Option<String>) -> Self {
        Self {
            last_applied: fingerprint,
            in_flight: false,
        }
    }

    pub fn last_applied(&self) -> Option<&str> {
        self.last_applied.as_deref()
    }

    /// Decide whether `request` must be forwarded. Returns the response to give
    /// immediately when it does not (`cached` or `skipped`), or `None` after
    /// marking the request as in flight.
    pub fn begin(&mut self, request: &Request) -> Option<Response> {
        let Request::ApplyAccessControl { config, lang } = request else {
            return None;
        };
        if self.in_flight {
            return Some(Response::skipped());
        }
        if self.last_applied.as_deref() == Some(apply_fingerprint(config, lang).as_str()) {
            return Some(Response::cached());
        }
        self.in_flight = true;
        None
    }

    /// Record the outcome of a forwarded request
    pub fn finish(&mut self, request: &Request, response: &Response) {
        self.in_flight = false;
        if let Request::ApplyAccessControl { config, lang } = request {
            if response.success {
                self.last_applied = Some(apply_fingerprint(config, lang));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Project;

    fn apply(lang: &str) -> Request {
        Request::ApplyAccessControl {
            config: AccessConfig::from_projects([Project::new("A", "X", ".a")]),
            lang: lang.to_string(),
        }
    }

    #[test]
    fn test_request_wire_shape() {
        let json = serde_json::to_value(apply("fr")).unwrap();
        assert_eq!(json["type"], "APPLY_ACCESS_CONTROL");
        assert_eq!(json["lang"], "fr");
        assert!(json["config"]["customProjects"]["A"].is_object());

        let request: Request = serde_json::from_str(r#"{"type": "GET_PAGE_INFO"}"#).unwrap();
        assert_eq!(request, Request::GetPageInfo { config: None });
    }

    #[test]
    fn test_unknown_request_type_rejected() {
        assert!(serde_json::from_str::<Request>(r#"{"type": "DROP_TABLES"}"#).is_err());
    }

    #[test]
    fn test_apply_defaults_language() {
        let request: Request =
            serde_json::from_str(r#"{"type": "APPLY_ACCESS_CONTROL", "config": {}}"#).unwrap();
        let Request::ApplyAccessControl { lang, .. } = request else {
            panic!("expected apply request");
        };
        assert_eq!(lang, "en");
    }

    #[test]
    fn test_coalescer_caches_same_payload() {
        let mut coalescer = ApplyCoalescer::new();
        let request = apply("en");

        assert_eq!(coalescer.begin(&request), None);
        assert_eq!(coalescer.begin(&request), Some(Response::skipped()));
        coalescer.finish(&request, &Response::ok());

        assert_eq!(coalescer.begin(&request), Some(Response::cached()));
        assert_eq!(coalescer.begin(&apply("de")), None);
    }

    #[test]
    fn test_coalescer_does_not_cache_failures() {
        let mut coalescer = ApplyCoalescer::new();
        let request = apply("en");
        assert_eq!(coalescer.begin(&request), None);
        coalescer.finish(&request, &Response::failed("boom"));
        assert_eq!(coalescer.begin(&request), None);
    }

    #[test]
    fn test_page_info_element_count() {
        let info: PageInfo = serde_json::from_str(
            r#"{"url": "https://x.org/", "projects": [{"name": "A", "elementCount": 3}], "totalElementCount": 3}"#,
        )
        .unwrap();
        assert_eq!(info.element_count("A"), 3);
        assert_eq!(info.element_count("B"), 0);
    }

    #[test]
    fn test_response_wire_shape() {
        let json = serde_json::to_value(Response::cached()).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "cached": true}));
    }
}
