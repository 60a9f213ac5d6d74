use std::time::Duration;

use log::LevelFilter;
use serde::Deserialize;
use web_sys::window;

/// Id of the optional `<script type="application/json">` block in index.html.
pub const CONFIG_ELEMENT_ID: &str = "board-config";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    /// Prefix for the activity endpoints. Empty means same origin.
    pub api_base: String,
    /// How long a status message stays visible.
    pub message_timeout_ms: u32,
    pub log_level: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            message_timeout_ms: 5000,
            log_level: "info".to_string(),
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut cfg: BoardConfig = serde_json::from_str(json)?;
        cfg.api_base = cfg.api_base.trim().trim_end_matches('/').to_string();
        Ok(cfg)
    }

    /// Reads the embedded config block, falling back to defaults.
    pub fn from_page() -> Self {
        let Some(json) = config_json_from_dom() else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("ignoring malformed #{} block: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.message_timeout_ms))
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

fn config_json_from_dom() -> Option<String> {
    let doc = window()?.document()?;
    let el = doc.get_element_by_id(CONFIG_ELEMENT_ID)?;
    el.text_content().filter(|s| !s.trim().is_empty())
}
