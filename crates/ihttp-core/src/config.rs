use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::transport::CurlOptions;

/// Client configuration loaded from `~/.config/ihttp/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Verify the server's TLS certificate. Off by default for compatibility
    /// with hosts using self-signed certificates; a warning is logged per client.
    #[serde(default)]
    pub ssl_verify_peer: bool,
    /// Follow `Location` redirects.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,
    /// Optional cap on followed redirects (None = libcurl default).
    #[serde(default)]
    pub max_redirections: Option<u32>,
    /// Optional connect timeout in seconds (None = libcurl default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Optional whole-transfer timeout in seconds (None = no limit).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// User agent sent when the caller sets none.
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_follow_redirects() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ssl_verify_peer: false,
            follow_redirects: true,
            max_redirections: None,
            connect_timeout_secs: None,
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Handle-level libcurl options derived from this config.
    pub fn curl_options(&self) -> CurlOptions {
        CurlOptions {
            ssl_verify_peer: self.ssl_verify_peer,
            follow_redirects: self.follow_redirects,
            max_redirections: self.max_redirections,
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ihttp")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ClientConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ClientConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<ClientConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: ClientConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
