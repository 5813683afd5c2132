use alphablock_core::mock::ActivityKind;
use alphablock_core::telemetry::Tone;
use bevy_egui::egui::{self, Color32, Rounding, Stroke};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }
}

/// Every colour the dashboard paints with. Render functions receive this
/// instead of branching on the theme themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePalette {
    pub theme: Theme,
    pub backdrop: Color32,
    pub panel_fill: Color32,
    pub panel_stroke: Color32,
    pub header_fill: Color32,
    pub text: Color32,
    pub text_dim: Color32,
    pub accent: Color32,
    pub good: Color32,
    pub caution: Color32,
    pub critical: Color32,
    pub info: Color32,
    pub grid: Color32,
    pub temperature: Color32,
    pub humidity: Color32,
}

impl ThemePalette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                theme,
                backdrop: Color32::from_rgb(14, 18, 16),
                panel_fill: Color32::from_rgba_unmultiplied(0, 0, 0, 200),
                panel_stroke: Color32::from_rgba_unmultiplied(255, 255, 255, 40),
                header_fill: Color32::from_rgba_unmultiplied(255, 255, 255, 12),
                text: Color32::from_gray(235),
                text_dim: Color32::from_gray(150),
                accent: Color32::from_rgb(236, 72, 153),
                good: Color32::from_rgb(74, 222, 128),
                caution: Color32::from_rgb(250, 204, 21),
                critical: Color32::from_rgb(248, 113, 113),
                info: Color32::from_rgb(96, 165, 250),
                grid: Color32::from_rgba_unmultiplied(255, 255, 255, 25),
                temperature: Color32::from_rgb(251, 146, 60),
                humidity: Color32::from_rgb(56, 189, 248),
            },
            Theme::Light => Self {
                theme,
                backdrop: Color32::from_rgb(226, 232, 228),
                panel_fill: Color32::from_rgba_unmultiplied(255, 255, 255, 230),
                panel_stroke: Color32::from_rgba_unmultiplied(0, 0, 0, 40),
                header_fill: Color32::from_rgba_unmultiplied(0, 0, 0, 10),
                text: Color32::from_gray(25),
                text_dim: Color32::from_gray(100),
                accent: Color32::from_rgb(219, 39, 119),
                good: Color32::from_rgb(22, 163, 74),
                caution: Color32::from_rgb(202, 138, 4),
                critical: Color32::from_rgb(220, 38, 38),
                info: Color32::from_rgb(37, 99, 235),
                grid: Color32::from_rgba_unmultiplied(0, 0, 0, 25),
                temperature: Color32::from_rgb(234, 88, 12),
                humidity: Color32::from_rgb(2, 132, 199),
            },
        }
    }

    pub fn tone(&self, tone: Tone) -> Color32 {
        match tone {
            Tone::Good => self.good,
            Tone::Caution => self.caution,
            Tone::Critical => self.critical,
            Tone::Info => self.info,
            Tone::Muted => self.text_dim,
        }
    }

    pub fn activity(&self, kind: ActivityKind) -> Color32 {
        match kind {
            ActivityKind::Info => self.info,
            ActivityKind::Warning => self.caution,
            ActivityKind::Error => self.critical,
            ActivityKind::Success => self.good,
        }
    }

    pub fn panel_frame(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.panel_fill)
            .stroke(Stroke::new(1.0, self.panel_stroke))
            .rounding(Rounding::same(8.0))
    }

    pub fn visuals(&self) -> egui::Visuals {
        let mut v = match self.theme {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        };
        v.override_text_color = Some(self.text);
        v.selection.bg_fill = self.accent;
        v.hyperlink_color = self.accent;
        v.window_fill = self.panel_fill;
        v.window_stroke = Stroke::new(1.0, self.panel_stroke);
        v.panel_fill = self.panel_fill;
        v
    }

    pub fn clear_color(&self) -> [f32; 3] {
        let [r, g, b, _] = self.backdrop.to_array();
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }
}
