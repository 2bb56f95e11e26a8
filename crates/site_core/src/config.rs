use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use shared::{ContentLibrary, SiteError};

pub const DEFAULT_CONFIG_PATH: &str = "site.toml";
pub const MAX_PARTICLE_COUNT: usize = 200_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub transition_delay_ms: u64,
    pub content_path: Option<PathBuf>,
    pub window_width: f32,
    pub window_height: f32,
    pub background: BackgroundSettings,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            transition_delay_ms: 500,
            content_path: None,
            window_width: 1280.0,
            window_height: 800.0,
            background: BackgroundSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundSettings {
    pub enabled: bool,
    /// Fail startup instead of running without a background when no surface
    /// can be acquired.
    pub required: bool,
    pub particle_count: usize,
    pub spread: f32,
    pub camera_distance: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub time_step: f32,
    pub rotation_rate_x: f32,
    pub rotation_rate_y: f32,
    pub point_size: f32,
    pub color: [u8; 3],
    pub opacity: f32,
    pub seed: Option<u64>,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            required: false,
            particle_count: 5000,
            spread: 1000.0,
            camera_distance: 50.0,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            time_step: 0.0005,
            rotation_rate_x: 0.1,
            rotation_rate_y: 0.2,
            point_size: 0.5,
            color: [0x9c, 0xa3, 0xaf],
            opacity: 0.8,
            seed: None,
        }
    }
}

impl SiteSettings {
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    /// Posts from `content_path` when set, otherwise the bundled set.
    pub fn load_content(&self) -> Result<ContentLibrary, SiteError> {
        match &self.content_path {
            Some(path) => ContentLibrary::load(path),
            None => ContentLibrary::bundled(),
        }
    }

    pub fn validate(&self) -> Result<(), SiteError> {
        let bg = &self.background;
        if !(1..=MAX_PARTICLE_COUNT).contains(&bg.particle_count) {
            return Err(SiteError::config(format!(
                "background.particle_count must be within 1..={MAX_PARTICLE_COUNT}, got {}",
                bg.particle_count
            )));
        }
        if !(bg.spread.is_finite() && bg.spread > 0.0) {
            return Err(SiteError::config(format!(
                "background.spread must be positive, got {}",
                bg.spread
            )));
        }
        if !(bg.fov_degrees > 0.0 && bg.fov_degrees < 180.0) {
            return Err(SiteError::config(format!(
                "background.fov_degrees must be within (0, 180), got {}",
                bg.fov_degrees
            )));
        }
        if !(bg.near > 0.0 && bg.near < bg.far) {
            return Err(SiteError::config(format!(
                "background.near ({}) must be positive and below background.far ({})",
                bg.near, bg.far
            )));
        }
        if !(0.0..=1.0).contains(&bg.opacity) {
            return Err(SiteError::config(format!(
                "background.opacity must be within [0, 1], got {}",
                bg.opacity
            )));
        }
        if !(self.window_width > 0.0 && self.window_height > 0.0) {
            return Err(SiteError::config("window size must be positive"));
        }
        Ok(())
    }
}

/// Reads `SITE_CONFIG` (or `site.toml`), then applies `APP__*` overrides.
pub fn load_settings() -> SiteSettings {
    let path = std::env::var("SITE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    resolve_settings(&path, |name| std::env::var(name).ok())
}

/// A missing or invalid file leaves the defaults in place; overrides that
/// would make the result invalid are dropped as a whole.
pub fn resolve_settings(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> SiteSettings {
    let base = if path.exists() {
        match load_settings_from(path) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(path = %path.display(), "ignoring site config: {err}");
                SiteSettings::default()
            }
        }
    } else {
        SiteSettings::default()
    };

    let mut settings = base.clone();
    apply_env_overrides(&mut settings, lookup);

    if let Err(err) = settings.validate() {
        tracing::warn!("ignoring APP__ overrides: {err}");
        return base;
    }
    settings
}

pub fn load_settings_from(path: &Path) -> Result<SiteSettings, SiteError> {
    let raw = fs::read_to_string(path)
        .map_err(|err| SiteError::config(format!("failed to read '{}': {err}", path.display())))?;
    let settings = parse_settings(&raw)?;
    settings.validate()?;
    Ok(settings)
}

pub fn parse_settings(raw: &str) -> Result<SiteSettings, SiteError> {
    toml::from_str::<SiteSettings>(raw).map_err(|err| SiteError::config(err.to_string()))
}

pub fn apply_env_overrides(settings: &mut SiteSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__TRANSITION_DELAY_MS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.transition_delay_ms = parsed;
        }
    }

    if let Some(v) = lookup("APP__CONTENT_PATH") {
        let v = v.trim();
        if !v.is_empty() {
            settings.content_path = Some(PathBuf::from(v));
        }
    }

    if let Some(v) = lookup("APP__PARTICLE_COUNT") {
        if let Ok(parsed) = v.trim().parse::<usize>() {
            settings.background.particle_count = parsed;
        }
    }

    if let Some(v) = lookup("APP__BACKGROUND_SEED") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.background.seed = Some(parsed);
        }
    }

    if let Some(v) = lookup("APP__BACKGROUND_ENABLED") {
        if let Some(parsed) = parse_flag(&v) {
            settings.background.enabled = parsed;
        }
    }

    if let Some(v) = lookup("APP__BACKGROUND_REQUIRED") {
        if let Some(parsed) = parse_flag(&v) {
            settings.background.required = parsed;
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
