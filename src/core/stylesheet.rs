//! CSS rule generation per behavior

use crate::core::entity::Behavior;
use crate::core::store::AccessConfig;
use crate::core::urlmatch::matches_url_pattern;

/// Element id of the injected style node
pub const STYLE_ELEMENT_ID: &str = "access-control-style";

/// Overlay text shown over restricted elements
pub const RESTRICTED_LABEL: &str = "Access Restricted";

/// CSS rule(s) applying `behavior` to a single selector
pub fn behavior_rule(behavior: Behavior, selector: &str) -> String {
    match behavior {
        Behavior::Hide => format!("{} {{ display: none !important; }}", selector),
        Behavior::Disable => format!(
            "{} {{ pointer-events: none !important; opacity: 0.3 !important; cursor: not-allowed !important; }}",
            selector
        ),
        Behavior::Blur => format!(
            "{} {{ filter: blur(5px) !important; user-select: none !important; }}",
            selector
        ),
        Behavior::Restrict => format!(
            "{sel} {{ position: relative !important; overflow: hidden !important; pointer-events: none !important; }}\n\
             {sel}::after {{ content: \"{label}\"; position: absolute !important; top: 0 !important; left: 0 !important; \
             right: 0 !important; bottom: 0 !important; background: rgba(0,0,0,0.8) !important; color: white !important; \
             display: flex !important; align-items: center !important; justify-content: center !important; \
             font-size: 16px !important; z-index: 9999 !important; }}",
            sel = selector,
            label = RESTRICTED_LABEL
        ),
    }
}

/// Rules for every enabled project whose URL pattern matches `url`, one per
/// selector, in project order
pub fn stylesheet_rules(config: &AccessConfig, url: &str) -> Vec<String> {
    config
        .custom_projects
        .values()
        .filter(|p| p.enabled && matches_url_pattern(&p.url_pattern, url))
        .flat_map(|p| {
            p.selectors()
                .into_iter()
                .map(|selector| behavior_rule(p.behavior, selector))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Full stylesheet text for `url`; empty when nothing applies
pub fn build_stylesheet(config: &AccessConfig, url: &str) -> String {
    stylesheet_rules(config, url).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Project;

    #[test]
    fn test_behavior_rules() {
        assert_eq!(
            behavior_rule(Behavior::Hide, "#ad"),
            "#ad { display: none !important; }"
        );
        assert!(behavior_rule(Behavior::Disable, ".btn").contains("pointer-events: none"));
        assert!(behavior_rule(Behavior::Blur, ".p").contains("blur(5px)"));

        let restrict = behavior_rule(Behavior::Restrict, ".panel");
        assert!(restrict.starts_with(".panel { position: relative"));
        assert!(restrict.contains(".panel::after"));
        assert!(restrict.contains("Access Restricted"));
    }

    #[test]
    fn test_stylesheet_filters_disabled_and_unmatched() {
        let mut disabled = Project::new("Off", "X", ".off");
        disabled.enabled = false;
        let config = AccessConfig::from_projects([
            Project::new("Ads", "X", "#ad, .banner"),
            disabled,
            Project::new("Admin", "X", ".admin").with_url_pattern("^/admin"),
        ]);

        let rules = stylesheet_rules(&config, "https://example.com/home");
        assert_eq!(rules.len(), 2);
        assert!(rules[0].starts_with("#ad "));
        assert!(rules[1].starts_with(".banner "));

        let rules = stylesheet_rules(&config, "https://example.com/admin");
        assert_eq!(rules.len(), 3);
    }

    #[test]
    fn test_empty_stylesheet() {
        assert_eq!(build_stylesheet(&AccessConfig::default(), "https://x.org"), "");
    }
}
