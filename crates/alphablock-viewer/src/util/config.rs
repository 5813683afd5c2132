use alphablock_core::layout::DEFAULT_MOBILE_BREAKPOINT;
use alphablock_core::WidgetVisibility;
use anyhow::Context;
use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ui::theme::Theme;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub theme: Theme,
    pub unit_id: String,
    pub crop: String,
    pub cycle_start: NaiveDate,
    pub harvest_date: NaiveDate,
    pub mobile_breakpoint: f32,
    pub activity_capacity: usize,
    pub feed_interval_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_seed: Option<u64>,
    pub toast_secs: f32,
    pub window_width: f32,
    pub window_height: f32,
    pub widgets: WidgetVisibility,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            unit_id: "AB-127".to_string(),
            crop: alphablock_core::mock::CROP.to_string(),
            cycle_start: alphablock_core::mock::cycle_start(),
            harvest_date: NaiveDate::from_ymd_opt(2025, 4, 14).unwrap_or_default(),
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            activity_capacity: 50,
            feed_interval_ms: 2000,
            feed_seed: None,
            toast_secs: 4.0,
            window_width: 1280.0,
            window_height: 800.0,
            widgets: WidgetVisibility::default(),
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "alphablock")?;
    Some(proj.config_dir().join("viewer.toml"))
}

pub fn load_or_default() -> ViewerConfig {
    let Some(path) = config_file_path() else {
        return ViewerConfig::default();
    };
    load_or_default_from_path(&path)
}

fn load_or_default_from_path(path: &Path) -> ViewerConfig {
    let Ok(contents) = fs::read_to_string(path) else {
        return ViewerConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "invalid viewer config, using defaults");
        ViewerConfig::default()
    })
}

pub fn save(cfg: &ViewerConfig) -> anyhow::Result<()> {
    let Some(path) = config_file_path() else {
        return Err(anyhow::anyhow!("no config directory available"));
    };
    save_to_path(cfg, &path)
}

fn save_to_path(cfg: &ViewerConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(cfg).context("failed to serialize viewer config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write viewer config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn viewer_config_roundtrip_save_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        let mut cfg = ViewerConfig::default();
        cfg.theme = Theme::Light;
        cfg.widgets.graph = true;
        cfg.feed_seed = Some(7);

        save_to_path(&cfg, &path).expect("save config");
        let loaded = load_or_default_from_path(&path);

        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let partial = r#"
theme = "light"

[widgets]
minimap = false
"#;
        let cfg: ViewerConfig = toml::from_str(partial).expect("parse partial config");

        assert_eq!(cfg.theme, Theme::Light);
        assert!(!cfg.widgets.minimap);
        assert!(cfg.widgets.metrics);
        assert_eq!(cfg.unit_id, "AB-127");
        assert_eq!(cfg.mobile_breakpoint, 768.0);
    }

    #[test]
    fn garbage_file_yields_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        fs::write(&path, "theme = [[[").expect("write garbage");

        assert_eq!(load_or_default_from_path(&path), ViewerConfig::default());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nope.toml");
        assert_eq!(load_or_default_from_path(&path), ViewerConfig::default());
    }
}
