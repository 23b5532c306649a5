//! Configuration types for biblio.
//!
//! [`Config::load`] reads `~/.config/biblio/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[search]
host      = "http://localhost:7700"
api_key   = ""
index     = "books"
page_size = 10

[session]
ttl_secs = 3600

[preferences]
ttl_secs = 7776000
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from
/// `~/.config/biblio/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

/// `[search]` section — the search backend endpoint and page framing.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// Backend API key; empty means unauthenticated.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_index")]
    pub index: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_host() -> String { "http://localhost:7700".to_string() }
fn default_index() -> String { "books".to_string() }
fn default_page_size() -> u32 { 10 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            api_key: String::new(),
            index: default_index(),
            page_size: default_page_size(),
        }
    }
}

/// `[session]` section — search-session idle expiry.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
}

fn default_session_ttl() -> u64 { 3600 }

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_secs: default_session_ttl() }
    }
}

/// `[preferences]` section — long-lived user preference expiry.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesConfig {
    #[serde(default = "default_prefs_ttl")]
    pub ttl_secs: u64,
}

fn default_prefs_ttl() -> u64 { 90 * 24 * 3600 }

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self { ttl_secs: default_prefs_ttl() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/biblio/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("biblio")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
