//! Run configuration.
//!
//! Three layers, later wins:
//!
//! 1. stock defaults ([`AppConfig::default`])
//! 2. an optional `manifest.toml` (sparse: only the keys you want to change)
//! 3. environment variables, read once at process entry
//!
//! | Variable | Overrides |
//! |---|---|
//! | `GITHUB_ACCESS_TOKEN` | bearer token (environment only, never in a file) |
//! | `GITHUB_OWNER` | `owner` |
//! | `GITHUB_REPO` | `repo` |
//! | `GITHUB_URL` | `public_url` |
//!
//! The environment is passed in as a lookup function rather than read from
//! inside the pipeline, so tests can fabricate any configuration.
//!
//! ## Configuration Options
//!
//! ```toml
//! assets_dir = "assets/memes"            # Directory to scan (non-recursive)
//! target_file = "list.json"              # Existing file in the repo root to replace
//! api_base = "https://api.github.com/repos"
//! public_url = "https://cdn.example.com/memes"  # Prefix for each entry's src
//! owner = "octo"
//! repo = "memes"
//!
//! [commit]
//! message = "server generation"
//! committer_name = "asset-manifest"
//! committer_email = "asset-manifest@users.noreply.github.com"
//!
//! [scan]
//! order = "filesystem"                   # or "name"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::publish::{CommitIdentity, Committer};
use crate::scan::EntryOrder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

pub const ENV_TOKEN: &str = "GITHUB_ACCESS_TOKEN";
pub const ENV_OWNER: &str = "GITHUB_OWNER";
pub const ENV_REPO: &str = "GITHUB_REPO";
pub const ENV_PUBLIC_URL: &str = "GITHUB_URL";

/// Stand-in for an unset owner/repo. Requests against it fail remotely;
/// it only keeps URL construction well-formed.
pub const PLACEHOLDER: &str = "#";

pub const DEFAULT_CONFIG_FILE: &str = "manifest.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Bearer credential. Redacted in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Everything one run needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Directory scanned for images.
    pub assets_dir: String,
    /// Name of the existing manifest file in the repository root.
    pub target_file: String,
    /// Content API prefix, up to and including `/repos`.
    pub api_base: String,
    /// Public URL prefix for entry `src` values (no trailing slash).
    pub public_url: String,
    pub owner: String,
    pub repo: String,
    /// From `GITHUB_ACCESS_TOKEN` only.
    #[serde(skip)]
    pub token: Option<Token>,
    pub commit: CommitConfig,
    pub scan: ScanConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets_dir: "assets/memes".to_string(),
            target_file: "list.json".to_string(),
            api_base: "https://api.github.com/repos".to_string(),
            public_url: String::new(),
            owner: String::new(),
            repo: String::new(),
            token: None,
            commit: CommitConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl AppConfig {
    /// Validate values that would otherwise fail late (mid-publish).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_file.is_empty() {
            return Err(ConfigError::Validation(
                "target_file must not be empty".into(),
            ));
        }
        if self.target_file.contains('/') {
            return Err(ConfigError::Validation(
                "target_file must name a file in the repository root".into(),
            ));
        }
        if !(self.api_base.starts_with("https://") || self.api_base.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "api_base must be an http(s) URL".into(),
            ));
        }
        if self.public_url.is_empty() {
            return Err(ConfigError::Validation(format!(
                "public_url must be set (config file or {ENV_PUBLIC_URL})"
            )));
        }
        if self.commit.message.trim().is_empty() {
            return Err(ConfigError::Validation(
                "commit.message must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Environment variables whose values a publish would need but which are
    /// missing (placeholder owner/repo, no token).
    pub fn unset_remote_settings(&self) -> Vec<&'static str> {
        let mut unset = Vec::new();
        if self.owner == PLACEHOLDER {
            unset.push(ENV_OWNER);
        }
        if self.repo == PLACEHOLDER {
            unset.push(ENV_REPO);
        }
        if self.token.is_none() {
            unset.push(ENV_TOKEN);
        }
        unset
    }
}

/// Commit metadata attached to every manifest update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommitConfig {
    pub message: String,
    pub committer_name: String,
    pub committer_email: String,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            message: "server generation".to_string(),
            committer_name: "asset-manifest".to_string(),
            committer_email: "asset-manifest@users.noreply.github.com".to_string(),
        }
    }
}

impl CommitConfig {
    pub fn identity(&self) -> CommitIdentity {
        CommitIdentity {
            message: self.message.clone(),
            committer: Committer {
                name: self.committer_name.clone(),
                email: self.committer_email.clone(),
            },
        }
    }
}

/// Scan behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// `filesystem` keeps directory enumeration order; `name` sorts by file name.
    pub order: EntryOrder,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AppConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value. `Ok(None)` if it doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults and deserialize.
///
/// Not validated yet: the environment layer may still supply required values.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<AppConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    Ok(merged.try_into()?)
}

/// Apply environment overrides. Blank values count as unset.
///
/// Owner and repo fall back to [`PLACEHOLDER`] when neither the file nor the
/// environment provides them. Nothing is logged here; see
/// [`warn_unset_remote`].
pub fn apply_env<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(token) = get(ENV_TOKEN) {
        config.token = Some(Token::new(token));
    }
    if let Some(owner) = get(ENV_OWNER) {
        config.owner = owner;
    }
    if let Some(repo) = get(ENV_REPO) {
        config.repo = repo;
    }
    if let Some(url) = get(ENV_PUBLIC_URL) {
        config.public_url = url;
    }

    if config.owner.is_empty() {
        config.owner = PLACEHOLDER.to_string();
    }
    if config.repo.is_empty() {
        config.repo = PLACEHOLDER.to_string();
    }
    config
}

/// Warn about remote settings left unset. Only commands that contact the
/// remote call this; a local scan doesn't need them.
pub fn warn_unset_remote(config: &AppConfig) {
    for var in config.unset_remote_settings() {
        match var {
            ENV_TOKEN => warn!("{var} is not set, requests will be unauthenticated"),
            _ => warn!("{var} is not set, using placeholder"),
        }
    }
}

/// Full load: defaults → file (if present) → environment → validation.
pub fn load_config<F>(path: &Path, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let overlay = load_raw_config(path)?;
    let config = apply_env(resolve_config(overlay)?, lookup);
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `manifest.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# asset-manifest configuration
# =============================
# All settings are optional. Values shown are the defaults.
# Environment variables override this file:
#   GITHUB_ACCESS_TOKEN  bearer token (environment only)
#   GITHUB_OWNER         owner
#   GITHUB_REPO          repo
#   GITHUB_URL           public_url
# Unknown keys will cause an error.

# Directory holding the images (not scanned recursively).
assets_dir = "assets/memes"

# Existing file in the repository root that receives the manifest.
# It is never created; publishing fails if it is missing.
target_file = "list.json"

# Content API prefix, up to and including /repos.
api_base = "https://api.github.com/repos"

# Public URL prefix for each entry's src (src = public_url + "/" + file name).
# Required, here or via GITHUB_URL.
public_url = ""

# Repository coordinates.
owner = ""
repo = ""

# ---------------------------------------------------------------------------
# Commit metadata
# ---------------------------------------------------------------------------
[commit]
message = "server generation"
committer_name = "asset-manifest"
committer_email = "asset-manifest@users.noreply.github.com"

# ---------------------------------------------------------------------------
# Scanning
# ---------------------------------------------------------------------------
[scan]
# "filesystem" keeps the OS directory order (varies by platform).
# "name" sorts entries by file name for a stable manifest.
order = "filesystem"
"##
}
