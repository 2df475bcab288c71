use std::time::Duration;

use shared::protocol::{PARAM_LANGUAGE, PARAM_REGION};

pub const DEFAULT_THROTTLE_WINDOW: Duration = Duration::from_millis(500);
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Fixed locale parameters sent with every catalog request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub language: String,
    pub region: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            language: "zh".into(),
            region: "US".into(),
        }
    }
}

impl Locale {
    pub fn params(&self) -> Vec<(String, String)> {
        vec![
            (PARAM_LANGUAGE.to_string(), self.language.clone()),
            (PARAM_REGION.to_string(), self.region.clone()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct HomeSettings {
    /// Mode changes propagate at most once per window.
    pub throttle_window: Duration,
    /// Wait after a selection change before fetching for it.
    pub settle_delay: Duration,
    pub locale: Locale,
}

impl Default for HomeSettings {
    fn default() -> Self {
        Self {
            throttle_window: DEFAULT_THROTTLE_WINDOW,
            settle_delay: DEFAULT_SETTLE_DELAY,
            locale: Locale::default(),
        }
    }
}
