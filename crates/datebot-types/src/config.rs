//! Bot configuration types.
//!
//! `BotConfig` mirrors `config.toml`. Every field has a default so an empty
//! file (or no file at all) yields a usable configuration; the channel and
//! role are optional and switch off their guard behavior when absent.

use serde::{Deserialize, Serialize};

use std::time::Duration;

use crate::ids::{ChannelId, RoleId};

/// Top-level configuration for the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Channel whose messages are deleted and where `/set` is recognized.
    #[serde(default)]
    pub channel_id: Option<ChannelId>,

    /// Role removed from members who post in the channel or confirm setup.
    #[serde(default)]
    pub role_id: Option<RoleId>,

    /// Time zone written into the generated `/set` command.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    /// Delay before asking the user whether they finished configuring.
    #[serde(default = "default_nudge_delay_secs")]
    pub nudge_delay_secs: u64,

    /// Idle time after which an in-progress selection is forgotten.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Upper bound on concurrently tracked selections.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// How often expired selections are swept.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_time_zone() -> String {
    "Europe/Warsaw".to_string()
}

fn default_nudge_delay_secs() -> u64 {
    40
}

// Interaction tokens expire after 15 minutes, so a selection older than that
// can no longer be answered anyway.
fn default_session_ttl_secs() -> u64 {
    15 * 60
}

fn default_max_sessions() -> usize {
    10_000
}

fn default_sweep_interval_secs() -> u64 {
    60
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            channel_id: None,
            role_id: None,
            time_zone: default_time_zone(),
            nudge_delay_secs: default_nudge_delay_secs(),
            session_ttl_secs: default_session_ttl_secs(),
            max_sessions: default_max_sessions(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl BotConfig {
    pub fn nudge_delay(&self) -> Duration {
        Duration::from_secs(self.nudge_delay_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}
