//! Explicit merge-patch shapes for partial updates.
//!
//! # Responsibility
//! - Define the partial-update shape for notes and global settings.
//! - Apply patches with one auditable precedence rule.
//!
//! # Invariants
//! - An incoming `Some` field always wins; `None` leaves the target field
//!   untouched. Nested shapes merge field-wise, never wholesale.
//! - Applying an empty patch is the identity.

use crate::model::note::{Note, NoteColor, NoteType};
use crate::model::settings::{ColorType, CustomFont, GlobalSettings};
use serde::{Deserialize, Serialize};

/// Partial update for one note. Only provided fields change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NoteType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<NoteColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_on_top: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_settings: Option<FontSettingsPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<AppearancePatch>,
}

/// Field-wise font override patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FontSettingsPatch {
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

/// Field-wise per-note appearance patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppearancePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_type: Option<ColorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_multiplier: Option<f64>,
}

impl NotePatch {
    /// Returns a patch carrying only `content`, the common autosave shape.
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Applies this patch onto `note`, field-wise.
    pub fn apply(&self, note: &mut Note) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(content) = &self.content {
            note.content = content.clone();
        }
        if let Some(kind) = self.kind {
            note.kind = kind;
        }
        if let Some(color) = self.color {
            note.color = color;
        }
        if let Some(is_open) = self.is_open {
            note.is_open = is_open;
        }
        if let Some(always_on_top) = self.always_on_top {
            note.always_on_top = always_on_top;
        }
        if let Some(x) = self.x {
            note.x = Some(x);
        }
        if let Some(y) = self.y {
            note.y = Some(y);
        }
        if let Some(width) = self.width {
            note.width = Some(width);
        }
        if let Some(height) = self.height {
            note.height = Some(height);
        }
        if let Some(font) = &self.font_settings {
            if let Some(family) = &font.family {
                note.font_settings.family = Some(family.clone());
            }
            if let Some(size) = font.size {
                note.font_settings.size = Some(size);
            }
            if let Some(bold) = font.bold {
                note.font_settings.bold = Some(bold);
            }
            if let Some(italic) = font.italic {
                note.font_settings.italic = Some(italic);
            }
            if let Some(underline) = font.underline {
                note.font_settings.underline = Some(underline);
            }
        }
        if let Some(appearance) = &self.appearance {
            if let Some(border_radius) = appearance.border_radius {
                note.appearance.border_radius = Some(border_radius);
            }
            if let Some(opacity) = appearance.opacity {
                note.appearance.opacity = Some(opacity);
            }
            if let Some(color_type) = appearance.color_type {
                note.appearance.color_type = Some(color_type);
            }
            if let Some(length_multiplier) = appearance.length_multiplier {
                note.appearance.length_multiplier = Some(length_multiplier);
            }
        }
    }
}

/// Partial update for the global settings singleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_type: Option<ColorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_settings: Option<FontSettingsPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fonts: Option<Vec<CustomFont>>,
}

impl GlobalSettingsPatch {
    /// Applies this patch onto the settings singleton, field-wise.
    pub fn apply(&self, settings: &mut GlobalSettings) {
        if let Some(border_radius) = self.border_radius {
            settings.appearance.border_radius = border_radius;
        }
        if let Some(opacity) = self.opacity {
            settings.appearance.opacity = opacity;
        }
        if let Some(color_type) = self.color_type {
            settings.appearance.color_type = color_type;
        }
        if let Some(scale) = self.scale {
            settings.appearance.scale = scale;
        }
        if let Some(font) = &self.font_settings {
            if let Some(family) = &font.family {
                settings.font_settings.family = family.clone();
            }
            if let Some(size) = font.size {
                settings.font_settings.size = size;
            }
            if let Some(bold) = font.bold {
                settings.font_settings.bold = bold;
            }
            if let Some(italic) = font.italic {
                settings.font_settings.italic = italic;
            }
            if let Some(underline) = font.underline {
                settings.font_settings.underline = underline;
            }
        }
        if let Some(custom_fonts) = &self.custom_fonts {
            settings.custom_fonts = custom_fonts.clone();
        }
    }

    /// Whether applying this patch changes the global scale.
    pub fn changes_scale(&self, current: &GlobalSettings) -> bool {
        matches!(self.scale, Some(scale) if scale != current.appearance.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppearancePatch, FontSettingsPatch, GlobalSettingsPatch, NotePatch};
    use crate::model::note::{Note, NoteColor, NoteType};
    use crate::model::settings::GlobalSettings;

    #[test]
    fn empty_patch_is_identity() {
        let mut note = Note::new();
        let before = note.clone();
        NotePatch::default().apply(&mut note);
        assert_eq!(note, before);
    }

    #[test]
    fn provided_fields_win_and_others_stay() {
        let mut note = Note::new();
        note.title = "original".to_string();
        note.content = "body".to_string();

        let patch = NotePatch {
            content: Some("new body".to_string()),
            color: Some(NoteColor::Pink),
            ..NotePatch::default()
        };
        patch.apply(&mut note);

        assert_eq!(note.title, "original");
        assert_eq!(note.content, "new body");
        assert_eq!(note.color, NoteColor::Pink);
        assert!(note.is_open);
    }

    #[test]
    fn geometry_fields_patch_independently() {
        let mut note = Note::new();
        note.x = Some(10);
        note.y = Some(20);
        note.width = Some(320);
        note.height = Some(350);

        let patch = NotePatch {
            x: Some(-5),
            height: Some(700),
            ..NotePatch::default()
        };
        patch.apply(&mut note);

        assert_eq!(note.x, Some(-5));
        assert_eq!(note.y, Some(20));
        assert_eq!(note.width, Some(320));
        assert_eq!(note.height, Some(700));
    }

    #[test]
    fn nested_patches_merge_field_wise_not_wholesale() {
        let mut note = Note::new();
        note.font_settings.family = Some("Georgia".to_string());
        note.font_settings.bold = Some(true);
        note.appearance.length_multiplier = Some(2.0);

        let patch = NotePatch {
            kind: Some(NoteType::Checklist),
            font_settings: Some(FontSettingsPatch {
                size: Some(20),
                ..FontSettingsPatch::default()
            }),
            appearance: Some(AppearancePatch {
                opacity: Some(90),
                ..AppearancePatch::default()
            }),
            ..NotePatch::default()
        };
        patch.apply(&mut note);

        assert_eq!(note.font_settings.family.as_deref(), Some("Georgia"));
        assert_eq!(note.font_settings.bold, Some(true));
        assert_eq!(note.font_settings.size, Some(20));
        assert_eq!(note.appearance.length_multiplier, Some(2.0));
        assert_eq!(note.appearance.opacity, Some(90));
    }

    #[test]
    fn global_patch_detects_scale_change() {
        let settings = GlobalSettings::default();
        let same = GlobalSettingsPatch {
            scale: Some(1.0),
            ..GlobalSettingsPatch::default()
        };
        let changed = GlobalSettingsPatch {
            scale: Some(1.5),
            ..GlobalSettingsPatch::default()
        };
        assert!(!same.changes_scale(&settings));
        assert!(changed.changes_scale(&settings));
        assert!(!GlobalSettingsPatch::default().changes_scale(&settings));
    }

    #[test]
    fn global_patch_applies_field_wise() {
        let mut settings = GlobalSettings::default();
        let patch = GlobalSettingsPatch {
            opacity: Some(75),
            scale: Some(1.4),
            ..GlobalSettingsPatch::default()
        };
        patch.apply(&mut settings);
        assert_eq!(settings.appearance.opacity, 75);
        assert_eq!(settings.appearance.scale, 1.4);
        assert_eq!(settings.appearance.border_radius, 12);
        assert_eq!(settings.font_settings.size, 16);
    }
}
