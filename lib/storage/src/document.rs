//! Override document format
//!
//! The override file is markdown holding fenced blocks:
//!
//! ````text
//! ```note
//! free-form notes, kept verbatim
//! ```
//!
//! ```json
//! [{"name": "\\int", "snippet": "\\int_{@1@}^{@2@}"}]
//! ```
//! ````
//!
//! The first `json` or `yaml` block is the override table. Its content is
//! regenerated from the registry on every save; every other block is written
//! back exactly as it was read.

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use texsuggest_core::{Entry, Error, Result};
use tracing::{debug, warn};

pub const JSON_BLOCK: &str = "json";
pub const YAML_BLOCK: &str = "yaml";

fn fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(\w+)\n(.*?)\n```").expect("valid fence regex"))
}

/// One fenced block of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub kind: String,
    /// Verbatim content; always empty for the override table
    pub content: String,
}

impl CodeBlock {
    pub fn new(kind: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            content: content.into(),
        }
    }

    pub fn is_override_table(&self) -> bool {
        is_table_kind(&self.kind)
    }
}

fn is_table_kind(kind: &str) -> bool {
    kind == JSON_BLOCK || kind == YAML_BLOCK
}

/// Overrides and block layout read from a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub overrides: IndexMap<String, Entry>,
    pub code_blocks: Vec<CodeBlock>,
}

/// Parse an override document.
///
/// Only the first `json`/`yaml` block is read as the override table; later
/// ones are skipped and will not be written back. Table items without a
/// non-empty `name` are ignored. A document with no table parses to no
/// overrides.
///
/// Fails with [`Error::MalformedOverrideTable`] when the table cannot be
/// decoded; nothing from that table is returned.
pub fn parse(document: &str) -> Result<ParsedDocument> {
    let mut parsed = ParsedDocument::default();
    let mut table_seen = false;

    for caps in fence_regex().captures_iter(document) {
        let kind = &caps[1];
        let content = &caps[2];

        if !is_table_kind(kind) {
            parsed.code_blocks.push(CodeBlock::new(kind, content));
            continue;
        }
        if table_seen {
            debug!("Skipping extra {} block", kind);
            continue;
        }

        let table = decode_table(kind, content)?;
        parsed.overrides = entries_from_table(kind, table)?;
        parsed.code_blocks.push(CodeBlock::new(kind, ""));
        table_seen = true;
    }

    Ok(parsed)
}

fn decode_table(kind: &str, content: &str) -> Result<Value> {
    let decoded = if kind == JSON_BLOCK {
        serde_json::from_str::<Value>(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string())
    };
    decoded.map_err(|reason| Error::MalformedOverrideTable {
        kind: kind.to_string(),
        reason,
    })
}

fn entries_from_table(kind: &str, table: Value) -> Result<IndexMap<String, Entry>> {
    let mut overrides = IndexMap::new();

    let items = match table {
        Value::Array(items) => items,
        Value::Null => return Ok(overrides),
        other => {
            warn!("The {} override table is not a list, ignoring it: {}", kind, other);
            return Ok(overrides);
        }
    };

    for item in items {
        let named = item
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|name| !name.is_empty());
        if !named {
            continue;
        }

        let entry: Entry =
            serde_json::from_value(item).map_err(|e| Error::MalformedOverrideTable {
                kind: kind.to_string(),
                reason: e.to_string(),
            })?;
        debug!("New override loaded: {}", entry.name);
        overrides.insert(entry.name.clone(), entry);
    }

    Ok(overrides)
}

/// Render the document for `overrides`, following the block layout in
/// `code_blocks`.
///
/// Table blocks get the current overrides (as a pretty JSON list or a YAML
/// list); other blocks keep their stored content. An empty layout yields a
/// single `json` table.
pub fn serialize(overrides: &IndexMap<String, Entry>, code_blocks: &[CodeBlock]) -> Result<String> {
    let entries: Vec<&Entry> = overrides.values().collect();
    let fallback = [CodeBlock::new(JSON_BLOCK, "")];
    let blocks = if code_blocks.is_empty() {
        &fallback[..]
    } else {
        code_blocks
    };

    let mut out = String::new();
    for block in blocks {
        let content = match block.kind.as_str() {
            JSON_BLOCK => serde_json::to_string_pretty(&entries)
                .map_err(|e| Error::Serialization(e.to_string()))?,
            YAML_BLOCK => serde_yaml::to_string(&entries)
                .map_err(|e| Error::Serialization(e.to_string()))?
                .trim_end()
                .to_string(),
            _ => block.content.clone(),
        };
        out.push_str("```");
        out.push_str(&block.kind);
        out.push('\n');
        out.push_str(&content);
        out.push_str("\n```\n");
    }

    Ok(out)
}

/// Starter document written by `init`
pub fn default_document() -> String {
    let notes = [
        "- Use either json or yaml to customize your snippets (be careful with quotes and indentation in yaml)",
        "- If a field (e.g. description) is empty (\"\" or []), the builtin value is used",
        "- Everything in the note section is kept when the file is saved",
        "- Do not leave a trailing comma at the end of the json list",
    ];
    let starter = [
        Entry::new("\\int").with_snippet("\\int_{@1@}^{@2@}"),
        Entry::new("\\sum").with_snippet("\\sum_{@1@}^{@2@}"),
    ];
    let overrides: IndexMap<String, Entry> = starter
        .into_iter()
        .map(|entry| (entry.name.clone(), entry))
        .collect();
    let blocks = [
        CodeBlock::new("note", notes.join("\n")),
        CodeBlock::new(JSON_BLOCK, ""),
    ];

    // The starter table only holds plain strings, which always encode.
    serialize(&overrides, &blocks).unwrap_or_default()
}
