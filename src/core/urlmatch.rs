//! URL pattern matching
//!
//! Patterns are regular expressions searched case-insensitively against the
//! path, query and fragment of the page URL. An empty pattern matches every
//! page; a pattern that does not compile matches none.

use tracing::warn;
use url::Url;

use crate::core::validation::compile_url_pattern;

/// Reduce an absolute URL to `path?query#fragment`, resolving dot segments
/// and percent-encoding the way a browser does. Anything that does not parse
/// as an absolute URL is returned unchanged.
pub fn normalize_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let mut reduced = parsed.path().to_string();
            if let Some(query) = parsed.query() {
                reduced.push('?');
                reduced.push_str(query);
            }
            if let Some(fragment) = parsed.fragment() {
                reduced.push('#');
                reduced.push_str(fragment);
            }
            reduced
        }
        Err(_) => url.to_string(),
    }
}

/// Whether a project with `pattern` applies on `url`
pub fn matches_url_pattern(pattern: &str, url: &str) -> bool {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return true;
    }

    match compile_url_pattern(pattern) {
        Ok(regex) => regex.is_match(&normalize_url(url)),
        Err(e) => {
            warn!(pattern, error = %e, "invalid URL pattern never matches");
            false
        }
    }
}
