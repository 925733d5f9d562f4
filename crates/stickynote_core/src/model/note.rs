//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical persisted record for one sticky note.
//! - Provide palette cycling and default construction helpers.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `is_open` is the source of truth for whether a surface should exist.
//! - `last_modified` is stamped by the store on every write, never by
//!   callers; it is a tie-break for "most recent" selection only.

use crate::model::settings::{FontSettings, NoteAppearance};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every note record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Content representation for one note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    /// Free-form plain text.
    Text,
    /// Ordered checklist, persisted as its flat text encoding.
    Checklist,
}

/// Fixed four-color note palette.
///
/// Serialized names match the persisted theme class names of existing
/// note files on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteColor {
    #[serde(rename = "theme-yellow")]
    Yellow,
    #[serde(rename = "theme-blue")]
    Blue,
    #[serde(rename = "theme-pink")]
    Pink,
    #[serde(rename = "theme-green")]
    Green,
}

/// Palette in cycle order. Color cycling walks this array modularly.
pub const PALETTE: [NoteColor; 4] = [
    NoteColor::Yellow,
    NoteColor::Blue,
    NoteColor::Pink,
    NoteColor::Green,
];

impl NoteColor {
    /// Returns the next palette color, wrapping after the last.
    ///
    /// Skips no colors: a full cycle visits every palette entry once.
    pub fn next(self) -> NoteColor {
        let index = PALETTE
            .iter()
            .position(|color| *color == self)
            .unwrap_or(0);
        PALETTE[(index + 1) % PALETTE.len()]
    }

    /// Returns some palette color different from `avoid`.
    ///
    /// Used when spawning a note from an existing one so two adjacent
    /// notes do not start with the same color.
    pub fn distinct_from(avoid: NoteColor) -> NoteColor {
        avoid.next()
    }
}

impl Default for NoteColor {
    fn default() -> Self {
        NoteColor::Yellow
    }
}

/// Last known surface placement, absent until the surface first reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Canonical persisted record for one sticky note.
///
/// Geometry fields are flattened (not nested) to keep the JSON artifact
/// shape identical to records written by earlier versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable global ID embedded in the artifact; authoritative over the
    /// filename at all times.
    pub id: NoteId,
    /// User-editable title; also feeds the sanitized filename component.
    #[serde(default = "default_title")]
    pub title: String,
    /// Flat content blob. For `NoteType::Checklist` this holds the
    /// checklist text encoding.
    #[serde(default)]
    pub content: String,
    /// Serialized as `type` to match the persisted schema naming.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: NoteType,
    #[serde(default)]
    pub color: NoteColor,
    /// Whether a surface should be materialized for this record.
    #[serde(default = "default_true")]
    pub is_open: bool,
    #[serde(default = "default_true")]
    pub always_on_top: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default)]
    pub font_settings: FontSettings,
    #[serde(default)]
    pub appearance: NoteAppearance,
    /// Unix epoch milliseconds of the last successful store write.
    #[serde(default)]
    pub last_modified: i64,
}

fn default_title() -> String {
    Note::DEFAULT_TITLE.to_string()
}

fn default_kind() -> NoteType {
    NoteType::Text
}

fn default_true() -> bool {
    true
}

impl Note {
    pub const DEFAULT_TITLE: &'static str = "Sticky Note";

    /// Creates a fresh default note with a generated stable ID.
    ///
    /// Geometry starts absent; the surface manager assigns first placement.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates a fresh default note with a caller-provided stable ID.
    pub fn with_id(id: NoteId) -> Self {
        Self {
            id,
            title: default_title(),
            content: String::new(),
            kind: NoteType::Text,
            color: NoteColor::default(),
            is_open: true,
            always_on_top: true,
            x: None,
            y: None,
            width: None,
            height: None,
            font_settings: FontSettings::default(),
            appearance: NoteAppearance::default(),
            last_modified: 0,
        }
    }

    /// Returns the last reported placement, when one has been persisted.
    pub fn bounds(&self) -> Option<Bounds> {
        Some(Bounds {
            x: self.x?,
            y: self.y?,
            width: self.width?,
            height: self.height?,
        })
    }

    /// Persists a placement verbatim. Plain move/resize never triggers
    /// derived-geometry recomputation.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.x = Some(bounds.x);
        self.y = Some(bounds.y);
        self.width = Some(bounds.width);
        self.height = Some(bounds.height);
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}
