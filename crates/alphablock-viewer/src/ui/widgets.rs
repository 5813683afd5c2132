use alphablock_core::mock::{self, ActivityLog, CareTask, HistoryPoint, TaskIcon};
use alphablock_core::telemetry::{relative_age, GrowthStage, Metrics, Reading};
use alphablock_core::Position;
use bevy_egui::egui::{self, Color32, Sense, Shape, Stroke};
use chrono::{DateTime, NaiveDate, Utc};

use crate::ui::theme::ThemePalette;

fn reading_row(ui: &mut egui::Ui, palette: &ThemePalette, label: &str, value: String, reading: Reading) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label).color(palette.text_dim));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(reading.label()).small().color(palette.tone(reading.tone())));
            ui.strong(value);
        });
    });
}

pub fn metrics_content(
    ui: &mut egui::Ui,
    palette: &ThemePalette,
    m: &Metrics,
    cycle_start: NaiveDate,
    today: NaiveDate,
) {
    reading_row(
        ui,
        palette,
        "Temperature",
        format!("{:.1}°C", m.temperature),
        m.temperature_reading(),
    );
    reading_row(
        ui,
        palette,
        "Humidity",
        format!("{:.0}%", m.humidity),
        m.humidity_reading(),
    );

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Battery").color(palette.text_dim));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if m.is_charging {
                ui.colored_label(palette.good, "Charging");
            }
            let band = palette.tone(m.battery_band().tone());
            ui.colored_label(band, format!("{} {:.0}%", m.battery_icon().glyph(), m.battery_percentage));
        });
    });
    ui.add(
        egui::ProgressBar::new(m.battery_percentage / 100.0)
            .desired_height(4.0)
            .fill(palette.tone(m.battery_band().tone())),
    );

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Lighting").color(palette.text_dim));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.strong(format!("{:.0}%", m.lighting_level));
        });
    });

    ui.separator();
    let health = m.mushroom_health;
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Mushroom health").color(palette.text_dim));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.colored_label(palette.tone(health.tone()), health.label());
        });
    });
    ui.label(egui::RichText::new(health.description()).small());
    ui.label(
        egui::RichText::new(format!(
            "Stage: {}",
            GrowthStage::since(cycle_start, today).label()
        ))
        .small(),
    );
    ui.label(
        egui::RichText::new(format!(
            "Cycle start: {} | Last update: {}",
            cycle_start.format("%B %-d, %Y"),
            m.last_updated.with_timezone(&chrono::Local).format("%H:%M:%S"),
        ))
        .small()
        .color(palette.text_dim),
    );
}

fn task_icon(icon: TaskIcon) -> &'static str {
    match icon {
        TaskIcon::Droplets => "💧",
        TaskIcon::Clock => "⏱",
        TaskIcon::Sun => "☀",
        TaskIcon::Calendar => "📅",
    }
}

fn task_card(ui: &mut egui::Ui, palette: &ThemePalette, task: &CareTask) {
    let fill = if task.completed {
        palette.header_fill
    } else {
        palette.panel_stroke
    };
    egui::Frame::none()
        .fill(fill)
        .stroke(Stroke::new(1.0, palette.panel_stroke))
        .rounding(6.0)
        .inner_margin(egui::Margin::same(8.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(task_icon(task.icon));
                ui.strong(task.title);
                if task.completed {
                    ui.colored_label(palette.good, "✔");
                }
            });
            ui.label(egui::RichText::new(task.description).small().color(palette.text_dim));
            for (label, value) in [
                ("Target:", task.target),
                ("Interval:", task.interval),
                ("Date:", task.due),
            ] {
                if let Some(value) = value {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(label).small().strong());
                        ui.label(egui::RichText::new(value).small());
                    });
                }
            }
        });
}

pub fn care_plan_content(ui: &mut egui::Ui, palette: &ThemePalette, cycle_start: NaiveDate) {
    for task in mock::care_tasks().iter() {
        task_card(ui, palette, task);
        ui.add_space(4.0);
    }
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
        ui.label(
            egui::RichText::new(format!("Cycle Started: {}", cycle_start.format("%B %-d, %Y")))
                .small()
                .color(palette.text_dim),
        );
    });
}

pub fn activity_content(
    ui: &mut egui::Ui,
    palette: &ThemePalette,
    log: &ActivityLog,
    now: DateTime<Utc>,
) {
    if log.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.colored_label(palette.text_dim, "No recent activity");
            ui.add_space(24.0);
        });
        return;
    }
    egui::ScrollArea::vertical()
        .id_source("activity-log")
        .max_height(180.0)
        .show(ui, |ui| {
            for entry in log.iter() {
                ui.horizontal(|ui| {
                    ui.colored_label(palette.activity(entry.kind), "●");
                    ui.vertical(|ui| {
                        ui.label(&entry.message);
                        ui.label(
                            egui::RichText::new(format!("⏱ {}", relative_age(entry.at, now)))
                                .small()
                                .color(palette.text_dim),
                        );
                    });
                });
                ui.separator();
            }
        });
}

/// Min/max over `values`, padded so a flat series still gets a visible band.
pub fn value_range(values: impl IntoIterator<Item = f32>) -> Option<(f32, f32)> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f32, f32)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
    let pad = ((hi - lo) * 0.1).max(0.5);
    Some((lo - pad, hi + pad))
}

fn polyline(rect: egui::Rect, values: &[f32], range: (f32, f32)) -> Vec<egui::Pos2> {
    let n = values.len().max(2) - 1;
    let span = (range.1 - range.0).max(f32::EPSILON);
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = rect.left() + rect.width() * i as f32 / n as f32;
            let y = rect.bottom() - rect.height() * (v - range.0) / span;
            egui::pos2(x, y)
        })
        .collect()
}

pub fn history_chart(ui: &mut egui::Ui, palette: &ThemePalette, history: &[HistoryPoint], height: f32) {
    let temps: Vec<f32> = history.iter().map(|p| p.temperature).collect();
    let hums: Vec<f32> = history.iter().map(|p| p.humidity).collect();

    ui.horizontal(|ui| {
        ui.colored_label(palette.temperature, "— Temperature (°C)");
        ui.colored_label(palette.humidity, "— Humidity (%)");
    });

    let (resp, painter) = ui.allocate_painter(
        egui::vec2(ui.available_width(), height),
        Sense::hover(),
    );
    let rect = resp.rect.shrink2(egui::vec2(4.0, 8.0));
    for i in 0..=4 {
        let y = rect.top() + rect.height() * i as f32 / 4.0;
        painter.line_segment(
            [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
            Stroke::new(1.0, palette.grid),
        );
    }

    if let Some(range) = value_range(temps.iter().copied()) {
        painter.add(Shape::line(polyline(rect, &temps, range), Stroke::new(2.0, palette.temperature)));
        painter.text(
            rect.left_top(),
            egui::Align2::LEFT_TOP,
            format!("{:.0}°", range.1),
            egui::FontId::proportional(10.0),
            palette.temperature,
        );
    }
    if let Some(range) = value_range(hums.iter().copied()) {
        painter.add(Shape::line(polyline(rect, &hums, range), Stroke::new(2.0, palette.humidity)));
        painter.text(
            rect.right_top(),
            egui::Align2::RIGHT_TOP,
            format!("{:.0}%", range.1),
            egui::FontId::proportional(10.0),
            palette.humidity,
        );
    }

    let step = (history.len() / 4).max(1);
    for (i, p) in history.iter().enumerate().step_by(step) {
        let x = rect.left() + rect.width() * i as f32 / (history.len().max(2) - 1) as f32;
        painter.text(
            egui::pos2(x, resp.rect.bottom()),
            egui::Align2::CENTER_BOTTOM,
            &p.label,
            egui::FontId::proportional(9.0),
            palette.text_dim,
        );
    }

    if let Some(hover) = resp.hover_pos() {
        let n = history.len().max(2) - 1;
        let t = ((hover.x - rect.left()) / rect.width()).clamp(0.0, 1.0);
        let idx = (t * n as f32).round() as usize;
        if let Some(p) = history.get(idx) {
            resp.on_hover_text(format!(
                "{}\n{:.1}°C  {:.0}%",
                p.label, p.temperature, p.humidity
            ));
        }
    }
}

pub fn sparkline(ui: &mut egui::Ui, values: &[f32], color: Color32, size: egui::Vec2) {
    let (resp, painter) = ui.allocate_painter(size, Sense::hover());
    if let Some(range) = value_range(values.iter().copied()) {
        painter.add(Shape::line(polyline(resp.rect, values, range), Stroke::new(1.5, color)));
    }
}

pub fn minimap_content(ui: &mut egui::Ui, palette: &ThemePalette, camera: Position, overhead: bool) {
    let side = ui.available_width().min(240.0);
    let (resp, painter) = ui.allocate_painter(egui::vec2(side, side), Sense::hover());
    let rect = resp.rect;
    painter.rect_filled(rect, 4.0, palette.header_fill);
    for i in 1..4 {
        let f = i as f32 / 4.0;
        let x = rect.left() + rect.width() * f;
        let y = rect.top() + rect.height() * f;
        painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], Stroke::new(1.0, palette.grid));
        painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], Stroke::new(1.0, palette.grid));
    }
    painter.rect_stroke(rect, 4.0, Stroke::new(1.0, palette.panel_stroke));

    let marker = egui::pos2(
        rect.left() + rect.width() * camera.x / 100.0,
        rect.top() + rect.height() * camera.y / 100.0,
    );
    painter.circle_filled(marker, 22.0, palette.info.gamma_multiply(0.2));
    painter.circle_filled(marker, 6.0, palette.info);
    painter.text(
        rect.right_bottom() - egui::vec2(4.0, 4.0),
        egui::Align2::RIGHT_BOTTOM,
        format!("X:{:.0}, Y:{:.0}", camera.x, camera.y),
        egui::FontId::monospace(11.0),
        palette.text,
    );
    ui.label(
        egui::RichText::new(if overhead { "Overhead camera" } else { "Head-mounted camera" })
            .small()
            .color(palette.text_dim),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_range_pads_flat_series() {
        assert_eq!(value_range([5.0, 5.0]), Some((4.5, 5.5)));
    }

    #[test]
    fn value_range_skips_non_finite_and_empty() {
        assert_eq!(value_range(std::iter::empty()), None);
        let (lo, hi) = value_range([10.0, f32::NAN, 20.0]).expect("range");
        assert_eq!((lo, hi), (9.0, 21.0));
    }

    #[test]
    fn polyline_spans_rect() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(100.0, 50.0));
        let pts = polyline(rect, &[0.0, 10.0], (0.0, 10.0));
        assert_eq!(pts, vec![egui::pos2(0.0, 50.0), egui::pos2(100.0, 0.0)]);
    }
}
