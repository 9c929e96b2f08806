//! Shared helper functions for CLI commands

use std::io::{self, BufRead, IsTerminal};

use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Escape pipes so a value stays inside one markdown table cell
pub fn escape_md(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

/// Read project names from stdin when it is piped
///
/// Enables pipelines like:
/// ```bash
/// pagewarden project list --module Ads -o id | pagewarden project disable
/// ```
///
/// Returns `None` when stdin is a terminal or nothing was read.
pub fn read_names_from_stdin() -> Option<Vec<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return None;
    }

    let names: Vec<String> = stdin
        .lock()
        .lines()
        .map_while(|line| line.ok())
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

/// Ask before a destructive action.
///
/// Skipped (answering yes) when `assume_yes` is set, when confirmation is
/// disabled in the config, or when stdin is not a terminal.
pub fn confirm(prompt: &str, assume_yes: bool, confirm_enabled: bool) -> Result<bool> {
    if assume_yes || !confirm_enabled || !io::stdin().is_terminal() {
        return Ok(true);
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .into_diagnostic()
}
