//! Checklist codec: text blob <-> ordered checklist items.
//!
//! # Responsibility
//! - Encode an ordered item sequence into the flat persisted text form.
//! - Decode any text blob back into items without ever rejecting input.
//!
//! # Invariants
//! - `decode(encode(items)) == items` for items without embedded newlines.
//! - Malformed lines decode permissively as unchecked free text.
//! - Pure functions, no I/O, no allocation beyond the returned values.
//!
//! Embedded newlines inside one item's text are unsupported: newline is the
//! record separator, so such items do not survive a round trip.

use serde::{Deserialize, Serialize};

const CHECKED_PREFIX: &str = "- [x]";
const UNCHECKED_PREFIX: &str = "- [ ]";

/// One checklist row. Transient and derived; never persisted directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    pub checked: bool,
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>, checked: bool) -> Self {
        Self {
            text: text.into(),
            checked,
        }
    }
}

/// Encodes items into the flat persisted form, one line per item.
///
/// An empty sequence encodes to an empty string.
pub fn encode(items: &[ChecklistItem]) -> String {
    items
        .iter()
        .map(|item| {
            let prefix = if item.checked {
                CHECKED_PREFIX
            } else {
                UNCHECKED_PREFIX
            };
            format!("{prefix} {}", item.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decodes a text blob into ordered checklist items.
///
/// Empty input decodes to an empty sequence; callers needing "at least one
/// editable row" inject their own placeholder, that is a presentation
/// concern. Lines without a recognized prefix become unchecked items whose
/// text is the raw line.
pub fn decode(text: &str) -> Vec<ChecklistItem> {
    if text.is_empty() {
        return Vec::new();
    }
    text.lines().map(decode_line).collect()
}

fn decode_line(line: &str) -> ChecklistItem {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix(CHECKED_PREFIX) {
        return ChecklistItem::new(strip_separator(rest), true);
    }
    if let Some(rest) = trimmed.strip_prefix(UNCHECKED_PREFIX) {
        return ChecklistItem::new(strip_separator(rest), false);
    }
    ChecklistItem::new(line, false)
}

// One space separates prefix and text in the canonical encoding; tolerate
// its absence in hand-edited records.
fn strip_separator(rest: &str) -> &str {
    rest.strip_prefix(' ').unwrap_or(rest)
}
