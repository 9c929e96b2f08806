//! Validation gate for project records
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. the selector string is not blank
//! 2. comma-splitting yields at least one selector
//! 3. every selector is syntactically well formed
//! 4. a non-empty URL pattern compiles as a regular expression
//! 5. the description fits in [`MAX_DESCRIPTION_LEN`] characters
//!
//! Name uniqueness depends on the operation (a rename excludes itself), so it
//! is checked by the callers in [`crate::core::actions`].

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::entities::project::{parse_selectors, Project};

/// Longest description accepted, in characters
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Validation failures surfaced to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("CSS selector cannot be empty")]
    EmptySelector,

    #[error("Selector syntax error: \"{0}\"")]
    InvalidSelector(String),

    #[error("Invalid regex pattern: {0}")]
    InvalidUrlPattern(String),

    #[error("Description is too long ({len} characters, at most {max})")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("Project name cannot be empty")]
    EmptyName,

    #[error("A project named \"{0}\" already exists")]
    DuplicateName(String),
}

/// Selector grammar check supplied by the host environment
pub trait SelectorSyntax {
    fn is_valid(&self, selector: &str) -> bool;
}

/// Structural CSS selector checker.
///
/// Accepts compound selectors joined by combinators and rejects the mistakes a
/// browser's `querySelector` would throw on: unbalanced brackets, parentheses
/// or quotes, dangling combinators, bare `#`/`.`/`:` and rule-block syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssSelectorSyntax;

impl SelectorSyntax for CssSelectorSyntax {
    fn is_valid(&self, selector: &str) -> bool {
        check_css_selector(selector)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || c == '\\' || !c.is_ascii()
}

fn check_css_selector(selector: &str) -> bool {
    let chars: Vec<char> = selector.trim().chars().collect();
    if chars.is_empty() {
        return false;
    }

    let mut parens = 0usize;
    let mut in_brackets = false;
    let mut bracket_has_content = false;
    let mut quote: Option<char> = None;
    // A combinator was seen and still needs a compound selector after it
    let mut pending_combinator = true;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        if let Some(q) = quote {
            if c == '\\' {
                i += 2;
                continue;
            }
            if c == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        match c {
            '{' | '}' | ';' => return false,
            '"' | '\'' => {
                if !in_brackets && parens == 0 {
                    return false;
                }
                quote = Some(c);
                bracket_has_content = true;
            }
            '[' => {
                if in_brackets {
                    return false;
                }
                in_brackets = true;
                bracket_has_content = false;
                pending_combinator = false;
            }
            ']' => {
                if !in_brackets || !bracket_has_content {
                    return false;
                }
                in_brackets = false;
            }
            _ if in_brackets => {
                if !c.is_whitespace() {
                    bracket_has_content = true;
                }
            }
            '(' => {
                // Only functional pseudo-classes take arguments
                if i == 0 || !is_ident_char(chars[i - 1]) {
                    return false;
                }
                parens += 1;
            }
            ')' => {
                if parens == 0 {
                    return false;
                }
                parens -= 1;
            }
            _ if parens > 0 => {}
            '>' | '+' | '~' => {
                if pending_combinator {
                    return false;
                }
                pending_combinator = true;
            }
            '#' | '.' => {
                if !chars.get(i + 1).is_some_and(|&n| is_ident_char(n)) {
                    return false;
                }
                pending_combinator = false;
            }
            ':' => {
                let mut j = i + 1;
                if chars.get(j) == Some(&':') {
                    j += 1;
                }
                if !chars.get(j).is_some_and(|&n| is_ident_char(n)) {
                    return false;
                }
                pending_combinator = false;
                i = j;
                continue;
            }
            '*' | '|' => pending_combinator = false,
            c if c.is_whitespace() => {}
            c if is_ident_char(c) => pending_combinator = false,
            _ => return false,
        }
        i += 1;
    }

    quote.is_none() && parens == 0 && !in_brackets && !pending_combinator
}

/// Compile a URL pattern the way the matcher does (trimmed, case-insensitive)
pub fn compile_url_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern.trim())
        .case_insensitive(true)
        .build()
}

/// Check that a URL pattern is empty or a valid regular expression
pub fn validate_url_pattern(pattern: &str) -> Result<(), ValidationError> {
    if pattern.trim().is_empty() {
        return Ok(());
    }
    compile_url_pattern(pattern)
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidUrlPattern(e.to_string()))
}

/// Run the validation gate over a project record
pub fn validate(project: &Project, syntax: &dyn SelectorSyntax) -> Result<(), ValidationError> {
    if project.selector.trim().is_empty() {
        return Err(ValidationError::EmptySelector);
    }

    let selectors = parse_selectors(&project.selector);
    if selectors.is_empty() {
        return Err(ValidationError::EmptySelector);
    }

    if let Some(bad) = selectors.iter().find(|s| !syntax.is_valid(s)) {
        return Err(ValidationError::InvalidSelector(bad.to_string()));
    }

    validate_url_pattern(&project.url_pattern)?;

    let len = project.description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong {
            len,
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}
