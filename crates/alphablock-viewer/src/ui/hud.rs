use alphablock_core::telemetry::HarvestCountdown;
use bevy::prelude::{Res, ResMut};
use bevy_egui::{egui, EguiContexts};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

use crate::dashboard::{DashboardState, FeedStatus};
use crate::ui::widgets::sparkline;
use crate::ui::{HEADER_H, HUD_EDGE_PADDING, SPARK_POINTS};

fn harvest_instant(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    midnight
        .and_local_timezone(Local)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

pub fn ui_header(mut contexts: EguiContexts, mut st: ResMut<DashboardState>) {
    let ctx = contexts.ctx_mut();
    let palette = st.palette;

    egui::TopBottomPanel::top("header")
        .exact_height(HEADER_H)
        .frame(
            egui::Frame::none()
                .fill(palette.panel_fill)
                .inner_margin(egui::Margin::symmetric(16.0, 8.0)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.heading(egui::RichText::new("Alpha Block").strong());
                        ui.label(
                            egui::RichText::new(&st.cfg.unit_id)
                                .monospace()
                                .color(palette.text_dim),
                        );
                    });
                    ui.label(
                        egui::RichText::new(format!(
                            "{} • Started {}",
                            st.cfg.crop,
                            st.cfg.cycle_start.format("%B %-d, %Y")
                        ))
                        .small()
                        .color(palette.accent),
                    );
                });

                ui.add_space(24.0);
                ui.separator();

                let mut humidifier = st.actuators.humidifier;
                if ui.toggle_value(&mut humidifier, "💧 Humidifier").changed() {
                    st.set_humidifier(humidifier);
                }
                let mut light = st.actuators.grow_light;
                if ui.toggle_value(&mut light, "☀ Grow light").changed() {
                    st.set_grow_light(light);
                }
                let cam_label = if st.overhead_camera {
                    "🎥 Overhead"
                } else {
                    "👁 Head cam"
                };
                if ui.button(cam_label).clicked() {
                    st.switch_camera();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let name = st.user_name().to_string();
                    ui.menu_button(format!("👤 {name}"), |ui| {
                        if ui.button("Change name…").clicked() {
                            st.ui.name_input = st.store.user_name().unwrap_or_default().to_string();
                            st.ui.name_prompt_open = true;
                            ui.close_menu();
                        }
                        let next = st.cfg.theme.toggled();
                        if ui.button(format!("{} theme", next.label())).clicked() {
                            st.set_theme(next);
                            ui.close_menu();
                        }
                        if ui.button("Shortcuts").clicked() {
                            st.ui.help_open = true;
                            ui.close_menu();
                        }
                    });
                    if ui.button("❓ Support").clicked() {
                        st.ui.support_open = true;
                    }
                    if ui.button("⚙ Controls").clicked() {
                        st.ui.control_open = !st.ui.control_open;
                    }
                    let (dot, hint) = match &st.feed {
                        FeedStatus::Connecting => (palette.text_dim, "Feed starting".to_string()),
                        FeedStatus::Live { interval_ms } => {
                            (palette.good, format!("Live, every {interval_ms} ms"))
                        }
                        FeedStatus::Stopped => (palette.caution, "Feed stopped".to_string()),
                        FeedStatus::Failed(e) => (palette.critical, format!("Feed error: {e}")),
                    };
                    ui.colored_label(dot, "●").on_hover_text(hint);
                });
            });
        });
}

/// Simulated camera backdrop plus the bottom-left harvest/sparkline overlay.
pub fn ui_overlay(mut contexts: EguiContexts, st: Res<DashboardState>) {
    let ctx = contexts.ctx_mut();
    let palette = st.palette;
    let screen = ctx.screen_rect();

    let painter = ctx.layer_painter(egui::LayerId::background());
    let center = screen.center();
    let cross = egui::Stroke::new(1.0, palette.grid);
    painter.line_segment(
        [egui::pos2(center.x - 40.0, center.y), egui::pos2(center.x + 40.0, center.y)],
        cross,
    );
    painter.line_segment(
        [egui::pos2(center.x, center.y - 40.0), egui::pos2(center.x, center.y + 40.0)],
        cross,
    );
    painter.circle_stroke(center, 120.0, cross);
    painter.text(
        egui::pos2(screen.left() + 72.0, screen.top() + HEADER_H + 12.0),
        egui::Align2::LEFT_TOP,
        if st.overhead_camera {
            "OVERHEAD CAM"
        } else {
            "HEAD CAM"
        },
        egui::FontId::monospace(12.0),
        palette.text_dim,
    );

    let countdown = HarvestCountdown::until(harvest_instant(st.cfg.harvest_date), st.now);
    let recent = st.history.len().saturating_sub(SPARK_POINTS);
    let temps: Vec<f32> = st.history[recent..].iter().map(|p| p.temperature).collect();
    let hums: Vec<f32> = st.history[recent..].iter().map(|p| p.humidity).collect();

    egui::Area::new(egui::Id::new("hud-overlay"))
        .order(egui::Order::Foreground)
        .anchor(
            egui::Align2::LEFT_BOTTOM,
            egui::vec2(HUD_EDGE_PADDING + 64.0, -HUD_EDGE_PADDING),
        )
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("⏳ Harvest in: {countdown}"))
                    .strong()
                    .color(palette.text),
            );
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.colored_label(palette.temperature, format!("{:.1}°C", st.metrics.temperature));
                    sparkline(ui, &temps, palette.temperature, egui::vec2(120.0, 28.0));
                });
                ui.add_space(12.0);
                ui.vertical(|ui| {
                    ui.colored_label(palette.humidity, format!("{:.0}%", st.metrics.humidity));
                    sparkline(ui, &hums, palette.humidity, egui::vec2(120.0, 28.0));
                });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harvest_instant_is_local_midnight() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 14).expect("date");
        let at = harvest_instant(date).with_timezone(&Local);
        assert_eq!(at.date_naive(), date);
        assert_eq!(at.time(), NaiveTime::MIN);
    }
}
