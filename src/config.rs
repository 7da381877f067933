use std::time::Duration;

use actix_web::cookie::Key;
use chrono::{FixedOffset, Offset, Utc};

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub bind_addr: String,
    pub session_key: Option<String>,
    pub explorer_base_url: String,
    pub avatar_base_url: String,
    pub fixture_path: String,
    pub mining_delay: Duration,
    pub display_offset: FixedOffset,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "Nouns DAO".to_string(),
            bind_addr: "127.0.0.1:8080".to_string(),
            session_key: None,
            explorer_base_url: "https://etherscan.io".to_string(),
            avatar_base_url: "/static/avatars".to_string(),
            fixture_path: "data/seed/proposals.json".to_string(),
            mining_delay: Duration::from_millis(1500),
            display_offset: Utc.fix(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_ok() {
            log::info!("Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("APP_NAME") {
            config.app_name = v;
        }
        if let Some(v) = lookup("BIND_ADDR") {
            config.bind_addr = v;
        }
        config.session_key = lookup("SESSION_KEY");
        if let Some(v) = lookup("EXPLORER_BASE_URL") {
            config.explorer_base_url = v;
        }
        if let Some(v) = lookup("AVATAR_BASE_URL") {
            config.avatar_base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = lookup("FIXTURE_PATH") {
            config.fixture_path = v;
        }
        if let Some(v) = lookup("MINING_DELAY_MS") {
            match v.parse::<u64>() {
                Ok(ms) => config.mining_delay = Duration::from_millis(ms),
                Err(_) => log::warn!("Ignoring MINING_DELAY_MS={v:?}: not a number"),
            }
        }
        if let Some(v) = lookup("DISPLAY_UTC_OFFSET_MINUTES") {
            match v.parse::<i32>().ok().and_then(|m| m.checked_mul(60)).and_then(FixedOffset::east_opt) {
                Some(offset) => config.display_offset = offset,
                None => log::warn!("Ignoring DISPLAY_UTC_OFFSET_MINUTES={v:?}: not a valid offset"),
            }
        }
        config
    }

    /// Cookie signing key. Needs 64+ bytes to survive restarts.
    pub fn cookie_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= 64 => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}
