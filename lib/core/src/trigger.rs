//! Decide whether the text before the cursor should open a suggestion list,
//! and which query to search for.

use crate::SuggestConfig;
use regex::Regex;
use std::sync::OnceLock;

fn command_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\\\w+)$").expect("valid command regex"))
}

fn delimiter_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\$|\$").expect("valid delimiter regex"))
}

/// The `\command` being typed at the end of the current line, if any
pub fn extract_query(text_before_cursor: &str) -> Option<&str> {
    let line = text_before_cursor
        .rsplit('\n')
        .next()
        .unwrap_or(text_before_cursor);
    command_regex()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether the end of `text` sits inside an open `$` or `$$` region
pub fn in_math_environment(text: &str) -> bool {
    let mut stack: Vec<&str> = Vec::new();
    for delimiter in delimiter_regex().find_iter(text) {
        let delimiter = delimiter.as_str();
        if stack.last() == Some(&delimiter) {
            stack.pop();
        } else {
            stack.push(delimiter);
        }
    }
    !stack.is_empty()
}

/// Query to search for, honouring the enabling settings
pub fn trigger_query<'a>(text_before_cursor: &'a str, config: &SuggestConfig) -> Option<&'a str> {
    let enabled = config.force_enabling
        || (config.auto_enabling && in_math_environment(text_before_cursor));
    if !enabled {
        return None;
    }
    extract_query(text_before_cursor)
}
