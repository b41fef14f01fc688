//! Bot configuration module.
//!
//! Handles loading and validating `easelbot.toml`. Configuration is
//! sparse: stock defaults apply, and a config file only needs the keys it
//! wants to override. Unknown keys are rejected to catch typos early.
//!
//! Credentials never live in the config file; they come from the
//! `EASELBOT_USERNAME` / `EASELBOT_PASSWORD` environment variables (see
//! [`crate::publish::Credentials`]).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [account]
//! base_url = "https://api.artwall.example"  # API the bot posts to
//!
//! [schedule]
//! interval_minutes = 5     # Minutes between posts
//!
//! [post]
//! work_dir = "."           # Where artifacts transit through disk
//! caption = "..."          # Caption attached to every post
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the working directory when no explicit config
/// path is given.
pub const CONFIG_FILE: &str = "easelbot.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Bot configuration loaded from `easelbot.toml`.
///
/// All fields have defaults. User config files need only specify the
/// values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BotConfig {
    /// The account's API endpoint.
    pub account: AccountConfig,
    /// Posting cadence.
    pub schedule: ScheduleConfig,
    /// Post content and artifact handling.
    pub post: PostConfig,
}

impl BotConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.account.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Validation(
                "account.base_url must start with http:// or https://".into(),
            ));
        }
        if self.schedule.interval_minutes == 0 {
            return Err(ConfigError::Validation(
                "schedule.interval_minutes must be at least 1".into(),
            ));
        }
        if self.post.work_dir.is_empty() {
            return Err(ConfigError::Validation(
                "post.work_dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// The account's API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccountConfig {
    /// Base URL of the posting API (scheme + host).
    pub base_url: String,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.artwall.example".to_string()
}

/// Posting cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleConfig {
    /// Minutes between scheduled posts. All user-facing messaging about
    /// the cadence derives from this one value.
    pub interval_minutes: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 5,
        }
    }
}

/// Post content and artifact handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostConfig {
    /// Directory artifacts are written into while an upload runs.
    pub work_dir: String,
    /// Caption attached to every scheduled post.
    pub caption: String,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            work_dir: ".".to_string(),
            caption: default_caption(),
        }
    }
}

fn default_caption() -> String {
    "🎨 Daily Generated Art\n.\n.\n.\n#GenerativeArt #AbstractArt #DigitalArt #ArtOfTheDay #AbstractArtwork #ModernArt"
        .to_string()
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Load `easelbot.toml` from the given directory.
///
/// A missing file yields the stock defaults; a present file is parsed
/// with unknown-key rejection and validated.
pub fn load_config(dir: &Path) -> Result<BotConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(BotConfig::default());
    }
    load_config_file(&path)
}

/// Load a specific config file, which must exist.
pub fn load_config_file(path: &Path) -> Result<BotConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: BotConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `easelbot.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Easelbot Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Credentials are NOT configured here. Set the EASELBOT_USERNAME and
# EASELBOT_PASSWORD environment variables (a .env file works too).
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Account
# ---------------------------------------------------------------------------
[account]
# Base URL of the posting API (scheme + host).
base_url = "https://api.artwall.example"

# ---------------------------------------------------------------------------
# Schedule
# ---------------------------------------------------------------------------
[schedule]
# Minutes between scheduled posts. The profile picture is rotated on a
# 1-in-10 chance at each post.
interval_minutes = 5

# ---------------------------------------------------------------------------
# Post content
# ---------------------------------------------------------------------------
[post]
# Directory artifacts are written into while an upload runs.
# Files are deleted as soon as their upload finishes.
work_dir = "."

# Caption attached to every scheduled post.
caption = """
🎨 Daily Generated Art
.
.
.
#GenerativeArt #AbstractArt #DigitalArt #ArtOfTheDay #AbstractArtwork #ModernArt"""
"##
}
