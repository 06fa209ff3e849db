use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use tracing::warn;

use crate::{
    feed::DEFAULT_FEED_URL,
    navigation::DEFAULT_LOCATE_ZOOM,
    scheduler::{DEFAULT_REFRESH_INTERVAL, MAX_REFRESH_INTERVAL, MIN_REFRESH_INTERVAL},
    view_mode::DEFAULT_LAYOUT_DELAY,
};

pub const SETTINGS_FILE: &str = "quakewatch.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub feed_url: String,
    pub refresh_interval: Duration,
    pub layout_delay: Duration,
    pub locate_zoom: f64,
    pub min_magnitude: f64,
    pub max_depth_km: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.into(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            layout_delay: DEFAULT_LAYOUT_DELAY,
            locate_zoom: DEFAULT_LOCATE_ZOOM,
            min_magnitude: 0.0,
            max_depth_km: 700.0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    feed_url: Option<String>,
    refresh_interval_secs: Option<u64>,
    layout_delay_ms: Option<u64>,
    locate_zoom: Option<f64>,
    min_magnitude: Option<f64>,
    max_depth_km: Option<f64>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE))
}

/// Defaults, then the TOML file at `path` if it exists, then environment overrides.
pub fn load_settings_from(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, file_cfg),
            Err(err) => warn!(
                path = %path.display(),
                error = %err,
                "ignoring unreadable settings file"
            ),
        }
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.feed_url {
        settings.feed_url = v;
    }
    if let Some(v) = file_cfg.refresh_interval_secs.and_then(refresh_interval) {
        settings.refresh_interval = v;
    }
    if let Some(v) = file_cfg.layout_delay_ms {
        settings.layout_delay = Duration::from_millis(v);
    }
    if let Some(v) = file_cfg.locate_zoom {
        settings.locate_zoom = v;
    }
    if let Some(v) = file_cfg.min_magnitude {
        settings.min_magnitude = v;
    }
    if let Some(v) = file_cfg.max_depth_km {
        settings.max_depth_km = v;
    }
}

pub(crate) fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("QUAKEWATCH_FEED_URL") {
        settings.feed_url = v;
    }
    if let Some(v) = var("APP__FEED_URL") {
        settings.feed_url = v;
    }

    if let Some(v) = parsed::<u64>(&var, "APP__REFRESH_INTERVAL_SECS").and_then(refresh_interval) {
        settings.refresh_interval = v;
    }
    if let Some(v) = parsed::<f64>(&var, "APP__MIN_MAGNITUDE") {
        settings.min_magnitude = v;
    }
    if let Some(v) = parsed::<f64>(&var, "APP__MAX_DEPTH_KM") {
        settings.max_depth_km = v;
    }
}

/// `None` (with a warning) for periods the scheduler cannot run with.
fn refresh_interval(secs: u64) -> Option<Duration> {
    let interval = Duration::from_secs(secs);
    if (MIN_REFRESH_INTERVAL..=MAX_REFRESH_INTERVAL).contains(&interval) {
        Some(interval)
    } else {
        warn!(
            secs,
            max_secs = MAX_REFRESH_INTERVAL.as_secs(),
            "ignoring out-of-range refresh interval"
        );
        None
    }
}

fn parsed<T: std::str::FromStr>(var: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = var(name)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(name, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
