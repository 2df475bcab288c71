use std::{fs, path::Path, time::Duration};

use client_core::{HomeSettings, Locale, DEFAULT_API_BASE_URL};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub language: String,
    pub region: String,
    pub throttle_ms: u64,
    pub settle_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let home = HomeSettings::default();
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            api_key: None,
            language: home.locale.language,
            region: home.locale.region,
            throttle_ms: home.throttle_window.as_millis() as u64,
            settle_ms: home.settle_delay.as_millis() as u64,
        }
    }
}

impl Settings {
    pub fn home_settings(&self) -> HomeSettings {
        HomeSettings {
            throttle_window: Duration::from_millis(self.throttle_ms),
            settle_delay: Duration::from_millis(self.settle_ms),
            locale: Locale {
                language: self.language.clone(),
                region: self.region.clone(),
            },
        }
    }
}

/// Every key is optional; absent keys keep the current value.
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    api_key: Option<String>,
    language: Option<String>,
    region: Option<String>,
    throttle_ms: Option<u64>,
    settle_ms: Option<u64>,
}

/// Defaults, then `path` if it exists, then environment overrides.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw, path);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file(settings: &mut Settings, raw: &str, path: &Path) {
    let file_cfg = match toml::from_str::<FileSettings>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!(path = %path.display(), "ignoring unreadable config file: {err}");
            return;
        }
    };

    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.api_key {
        settings.api_key = non_blank(v);
    }
    if let Some(v) = file_cfg.language {
        settings.language = v;
    }
    if let Some(v) = file_cfg.region {
        settings.region = v;
    }
    if let Some(v) = file_cfg.throttle_ms {
        settings.throttle_ms = v;
    }
    if let Some(v) = file_cfg.settle_ms {
        settings.settle_ms = v;
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("TMDB_API_KEY") {
        settings.api_key = non_blank(v);
    }
    if let Some(v) = var("APP__API_KEY") {
        settings.api_key = non_blank(v);
    }

    if let Some(v) = var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__LANGUAGE") {
        settings.language = v;
    }
    if let Some(v) = var("APP__REGION") {
        settings.region = v;
    }

    if let Some(v) = var("APP__THROTTLE_MS") {
        match v.parse() {
            Ok(ms) => settings.throttle_ms = ms,
            Err(_) => warn!(
                value = %v,
                "APP__THROTTLE_MS is not a number; keeping {}",
                settings.throttle_ms
            ),
        }
    }
    if let Some(v) = var("APP__SETTLE_MS") {
        match v.parse() {
            Ok(ms) => settings.settle_ms = ms,
            Err(_) => warn!(
                value = %v,
                "APP__SETTLE_MS is not a number; keeping {}",
                settings.settle_ms
            ),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
