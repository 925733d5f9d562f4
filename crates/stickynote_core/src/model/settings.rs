//! Font, appearance and global settings records.
//!
//! # Responsibility
//! - Define per-note override shapes (`FontSettings`, `NoteAppearance`).
//! - Define the process-wide `GlobalSettings` singleton record.
//!
//! # Invariants
//! - Per-note fields are all optional; absence means "use global default".
//! - `GlobalSettings` is loaded once, mutated only through an explicit
//!   patch operation, and persisted immediately after every mutation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Color fill style for note backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorType {
    #[serde(rename = "style-gradient")]
    Gradient,
    #[serde(rename = "style-solid")]
    Solid,
}

impl Default for ColorType {
    fn default() -> Self {
        ColorType::Gradient
    }
}

/// Font configuration attached to one note.
///
/// Every field is optional so the settings cascade can distinguish "note
/// overrides this" from "note inherits the global default".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FontSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
}

/// Per-note appearance overrides.
///
/// `length_multiplier` lives only here: the global record has no notion of
/// per-note content length. `scale` may appear in old persisted records but
/// is ignored by the cascade, which sources scale from global alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NoteAppearance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_type: Option<ColorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

/// Global appearance defaults applied to every note without an override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalAppearance {
    #[serde(default = "default_border_radius")]
    pub border_radius: u32,
    #[serde(default = "default_opacity")]
    pub opacity: u32,
    #[serde(default)]
    pub color_type: ColorType,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_border_radius() -> u32 {
    12
}

fn default_opacity() -> u32 {
    100
}

fn default_scale() -> f64 {
    1.0
}

impl Default for GlobalAppearance {
    fn default() -> Self {
        Self {
            border_radius: default_border_radius(),
            opacity: default_opacity(),
            color_type: ColorType::default(),
            scale: default_scale(),
        }
    }
}

/// Global font defaults. Unlike the per-note shape, these are concrete
/// values, so the cascade always has a base to fall back on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalFontSettings {
    #[serde(default = "default_font_family")]
    pub family: String,
    #[serde(default = "default_font_size")]
    pub size: u32,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

fn default_font_family() -> String {
    "'Outfit', sans-serif".to_string()
}

fn default_font_size() -> u32 {
    16
}

impl Default for GlobalFontSettings {
    fn default() -> Self {
        Self {
            family: default_font_family(),
            size: default_font_size(),
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

/// A user-registered font file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFont {
    pub name: String,
    pub path: PathBuf,
}

/// Process-wide settings singleton, persisted as one artifact next to the
/// note records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    #[serde(default)]
    pub appearance: GlobalAppearance,
    #[serde(default)]
    pub font_settings: GlobalFontSettings,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fonts: Vec<CustomFont>,
}

#[cfg(test)]
mod tests {
    use super::{ColorType, GlobalSettings};

    #[test]
    fn defaults_match_shipped_configuration() {
        let settings = GlobalSettings::default();
        assert_eq!(settings.appearance.border_radius, 12);
        assert_eq!(settings.appearance.opacity, 100);
        assert_eq!(settings.appearance.color_type, ColorType::Gradient);
        assert_eq!(settings.appearance.scale, 1.0);
        assert_eq!(settings.font_settings.family, "'Outfit', sans-serif");
        assert_eq!(settings.font_settings.size, 16);
        assert!(settings.custom_fonts.is_empty());
    }

    #[test]
    fn partial_settings_artifact_fills_missing_fields_with_defaults() {
        let settings: GlobalSettings =
            serde_json::from_str(r#"{"appearance":{"opacity":80}}"#).unwrap();
        assert_eq!(settings.appearance.opacity, 80);
        assert_eq!(settings.appearance.border_radius, 12);
        assert_eq!(settings.font_settings.size, 16);
    }
}
