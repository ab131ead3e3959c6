use eframe::egui::Color32;

use crate::config::ThemeName;

/// Colours for window chrome: backgrounds, status bar, overlays. Page
/// content is never tinted.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    /// Behind the audience page.
    pub stage: Color32,
    /// Behind the presenter pages.
    pub background: Color32,
    pub foreground: Color32,
    pub accent: Color32,
    pub panel: Color32,
    pub warning: Color32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            stage: Color32::BLACK,
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            foreground: Color32::from_rgb(0xE0, 0xE0, 0xE0),
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            panel: Color32::from_rgb(0x2B, 0x2B, 0x2B),
            warning: Color32::from_rgb(0xE8, 0xA8, 0x38),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            stage: Color32::BLACK,
            background: Color32::from_rgb(0xF0, 0xF0, 0xF0),
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            accent: Color32::from_rgb(0x0F, 0x34, 0x60),
            panel: Color32::WHITE,
            warning: Color32::from_rgb(0xB8, 0x7B, 0x0A),
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}
