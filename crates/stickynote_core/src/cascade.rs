//! Settings cascade: global defaults overridden per note.
//!
//! # Responsibility
//! - Merge `GlobalSettings` with one note's overrides into an effective
//!   appearance/font configuration.
//! - Derive surface geometry from scale and length multiplier.
//!
//! # Invariants
//! - A note field that is present wins over the global default.
//! - `scale` is ALWAYS sourced from global: it is a display-density
//!   preference, never a per-note one.
//! - `length_multiplier` is ALWAYS sourced from the note: global has no
//!   notion of per-note content length.
//! - Derived geometry is recomputed only when scale or multiplier change;
//!   plain move/resize persists verbatim and never passes through here.

use crate::model::note::Note;
use crate::model::settings::{ColorType, GlobalSettings};

/// Unscaled surface width in logical pixels.
pub const BASE_WIDTH: f64 = 320.0;
/// Unscaled surface height in logical pixels, before length multiplication.
pub const BASE_HEIGHT: f64 = 350.0;

/// Fully resolved appearance and font configuration for one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveAppearance {
    pub border_radius: u32,
    pub opacity: u32,
    pub color_type: ColorType,
    pub scale: f64,
    pub length_multiplier: f64,
    pub font_family: String,
    pub font_size: u32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

/// Resolves the effective configuration for `note` under `global`.
pub fn effective(global: &GlobalSettings, note: &Note) -> EffectiveAppearance {
    let appearance = &note.appearance;
    let font = &note.font_settings;
    EffectiveAppearance {
        border_radius: appearance
            .border_radius
            .unwrap_or(global.appearance.border_radius),
        opacity: appearance.opacity.unwrap_or(global.appearance.opacity),
        color_type: appearance
            .color_type
            .unwrap_or(global.appearance.color_type),
        scale: global.appearance.scale,
        length_multiplier: appearance.length_multiplier.unwrap_or(1.0),
        font_family: font
            .family
            .clone()
            .unwrap_or_else(|| global.font_settings.family.clone()),
        font_size: font.size.unwrap_or(global.font_settings.size),
        bold: font.bold.unwrap_or(global.font_settings.bold),
        italic: font.italic.unwrap_or(global.font_settings.italic),
        underline: font.underline.unwrap_or(global.font_settings.underline),
    }
}

impl EffectiveAppearance {
    /// Derived surface width for the current scale.
    pub fn derived_width(&self) -> u32 {
        (BASE_WIDTH * self.scale).round() as u32
    }

    /// Derived surface height for the current scale and length multiplier.
    pub fn derived_height(&self) -> u32 {
        (BASE_HEIGHT * self.length_multiplier * self.scale).round() as u32
    }
}
