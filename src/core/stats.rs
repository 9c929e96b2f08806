//! Snapshot statistics shown alongside project listings

use serde::Serialize;

use crate::core::groups::group_projects;
use crate::core::message::PageInfo;
use crate::core::store::AccessConfig;
use crate::core::urlmatch::matches_url_pattern;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: usize,
    pub enabled: usize,
    pub disabled: usize,
    pub modules: usize,

    /// Projects with a URL pattern that does not match the inspected URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmatched_url: Option<usize>,

    /// Elements the page reported as matched, across all projects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_elements: Option<u64>,
}

/// Count projects, modules and, when a URL is given, projects whose pattern
/// excludes that URL
pub fn statistics(config: &AccessConfig, url: Option<&str>) -> Statistics {
    let total = config.len();
    let enabled = config.enabled_count();
    Statistics {
        total,
        enabled,
        disabled: total - enabled,
        modules: group_projects(config).len(),
        unmatched_url: url.map(|url| unmatched_url_count(config, url)),
        page_elements: None,
    }
}

/// Statistics against a page report: the URL comes from the report
pub fn page_statistics(config: &AccessConfig, page: &PageInfo) -> Statistics {
    Statistics {
        page_elements: Some(page.total_element_count),
        ..statistics(config, Some(&page.url))
    }
}

/// Projects not effective on `url` because their (non-empty) pattern does not match
pub fn unmatched_url_count(config: &AccessConfig, url: &str) -> usize {
    config
        .custom_projects
        .values()
        .filter(|p| !p.url_pattern.trim().is_empty() && !matches_url_pattern(&p.url_pattern, url))
        .count()
}
