//! Session configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::notice::DEFAULT_DISPLAY_MS;
use crate::seed::parse_seed;
use crate::store::RosterStore;

/// Top-level roster configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Start with the built-in sample students when no seed file is set.
    #[serde(default = "default_true")]
    pub sample_data: bool,
    /// TOML file to pre-populate the roster from.
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
    /// Where rendered pages are written by default.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// How long notices stay visible, in milliseconds.
    #[serde(default = "default_notice_duration")]
    pub notice_duration_ms: u64,
}

fn default_true() -> bool {
    true
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./roster-output")
}
fn default_notice_duration() -> u64 {
    DEFAULT_DISPLAY_MS
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            sample_data: true,
            seed_file: None,
            output_dir: default_output_dir(),
            notice_duration_ms: default_notice_duration(),
        }
    }
}

impl RosterConfig {
    /// Build the initial store for a session.
    ///
    /// A seed file takes precedence over the sample data.
    pub fn initial_store(&self) -> Result<RosterStore> {
        match &self.seed_file {
            Some(path) => parse_seed(path),
            None if self.sample_data => Ok(RosterStore::with_sample_data()),
            None => Ok(RosterStore::new()),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + 2 + len];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    result.push_str(rest);
    result
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `roster.toml` in the current directory
/// 2. `~/.config/roster/config.toml`
///
/// Environment variable overrides: `ROSTER_SEED_FILE`, `ROSTER_SAMPLE_DATA`.
pub fn load_config_from(path: Option<&Path>) -> Result<RosterConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("roster.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<RosterConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => RosterConfig::default(),
    };

    // Apply env var overrides
    if let Ok(seed) = std::env::var("ROSTER_SEED_FILE") {
        if !seed.trim().is_empty() {
            config.seed_file = Some(PathBuf::from(seed));
        }
    }

    if let Ok(raw) = std::env::var("ROSTER_SAMPLE_DATA") {
        match parse_flag(&raw) {
            Some(flag) => config.sample_data = flag,
            None => tracing::warn!("ignoring ROSTER_SAMPLE_DATA={raw:?}: expected true or false"),
        }
    }

    config.seed_file = config
        .seed_file
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("roster"))
}
