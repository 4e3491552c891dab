// Agent configuration and identity

use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = ".rpagentrc.toml";

pub const ENV_UPLOAD_TRACE: &str = "RP_UPLOAD_TRACE";
pub const ENV_UPLOAD_VIDEO: &str = "RP_UPLOAD_VIDEO";
pub const ENV_SKIPPED_ISSUE: &str = "RP_SKIPPED_ISSUE";

/// Reporter options recognized by the agent.
///
/// Each flag is accepted as a boolean or a string by the loaders. Only `false`
/// and `"false"` disable a flag; any other value, or a missing key, leaves it
/// enabled. After loading, the flags are plain booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    /// Upload Playwright-style trace archives
    #[serde(
        default = "default_enabled",
        deserialize_with = "deserialize_flag",
        alias = "upload_trace"
    )]
    pub upload_trace: bool,

    /// Upload recorded videos
    #[serde(
        default = "default_enabled",
        deserialize_with = "deserialize_flag",
        alias = "upload_video"
    )]
    pub upload_video: bool,

    /// Let the server attach "to investigate" issues to skipped items
    #[serde(
        default = "default_enabled",
        deserialize_with = "deserialize_flag",
        alias = "skipped_issue"
    )]
    pub skipped_issue: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            upload_trace: default_enabled(),
            upload_video: default_enabled(),
            skipped_issue: default_enabled(),
        }
    }
}

/// Attachment filtering switches derived from [`AgentConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentOptions {
    pub upload_trace: bool,
    pub upload_video: bool,
}

impl Default for AttachmentOptions {
    fn default() -> Self {
        Self {
            upload_trace: true,
            upload_video: true,
        }
    }
}

fn default_enabled() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseFlag {
    Bool(bool),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LooseFlag::deserialize(deserializer)? {
        LooseFlag::Bool(value) => value,
        LooseFlag::Text(text) => !is_false_flag(&text),
        LooseFlag::Other(_) => true,
    })
}

/// Whether a string flag value means "disabled"
pub fn is_false_flag(value: &str) -> bool {
    value == "false"
}

impl AgentConfig {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // 1. ./.rpagentrc.toml
        // 2. ~/.rpagentrc.toml
        let candidates: Vec<PathBuf> = [
            std::env::current_dir().ok(),
            dirs::home_dir(),
        ]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .collect();

        let path = candidates.iter().find(|path| path.exists())?;
        debug!("Loading agent config from {}", path.display());

        match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring agent config: {:#}", e);
                None
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse agent config: {}", path.display()))
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Build configuration from reporter options handed over by the host as JSON
    pub fn from_json(options: serde_json::Value) -> std::result::Result<Self, ConfigError> {
        Ok(serde_json::from_value(options)?)
    }

    /// Apply `RP_*` environment overrides on top of the loaded values
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| lookup(key).map(|value| !is_false_flag(&value));

        if let Some(value) = flag(ENV_UPLOAD_TRACE) {
            self.upload_trace = value;
        }
        if let Some(value) = flag(ENV_UPLOAD_VIDEO) {
            self.upload_video = value;
        }
        if let Some(value) = flag(ENV_SKIPPED_ISSUE) {
            self.skipped_issue = value;
        }
    }

    pub fn attachment_options(&self) -> AttachmentOptions {
        AttachmentOptions {
            upload_trace: self.upload_trace,
            upload_video: self.upload_video,
        }
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

/// Agent identity reported as the `agent` system attribute.
///
/// Built once at startup and passed by reference to whatever formats attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInfo {
    pub name: String,
    pub version: String,
}

impl AgentInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Identity taken from this crate's package metadata
    pub fn from_package() -> Self {
        Self::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

impl fmt::Display for AgentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.name, self.version)
    }
}
