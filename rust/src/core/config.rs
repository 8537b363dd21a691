use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::state::MessengerState;

use super::DEFAULT_MAX_LIFECYCLE_CHAIN;

pub const CONFIG_FILE_NAME: &str = "messenger_config.json";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Run the protocol daemon in-process. Defaults to true.
    pub embedded: Option<bool>,
    pub daemon_address: Option<String>,
    pub max_lifecycle_chain: Option<usize>,
}

impl StoreConfig {
    pub fn embedded(&self) -> bool {
        if let Some(flag) = parse_flag(std::env::var("MESSENGER_EMBEDDED").ok().as_deref()) {
            return flag;
        }
        self.embedded.unwrap_or(true)
    }

    pub fn max_lifecycle_chain(&self) -> usize {
        self.max_lifecycle_chain
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_LIFECYCLE_CHAIN)
    }

    pub fn initial_state(&self) -> MessengerState {
        let address = self
            .daemon_address
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        MessengerState::with_mode(self.embedded(), address)
    }
}

fn parse_flag(value: Option<&str>) -> Option<bool> {
    let v = value?.trim();
    if v.is_empty() {
        return None;
    }
    Some(v != "0" && !v.eq_ignore_ascii_case("false"))
}

/// Missing or unreadable config falls back to defaults.
pub fn load_store_config(data_dir: &str) -> StoreConfig {
    let path = Path::new(data_dir).join(CONFIG_FILE_NAME);
    if !path.exists() {
        return StoreConfig::default();
    }
    match read_store_config(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), err = %format!("{e:#}"), "ignoring store config");
            StoreConfig::default()
        }
    }
}

fn read_store_config(path: &Path) -> anyhow::Result<StoreConfig> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}
