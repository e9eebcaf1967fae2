//! Bot configuration: defaults, an optional YAML file, then environment
//! variables named the way the hosted bot has always been configured.

use crate::backend::DEFAULT_WANDBOX_URL;
use crate::registry::{DenyList, DEFAULT_BROKEN_COMPILERS, DEFAULT_BROKEN_LANGUAGES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

pub const DEFAULT_MAX_SOURCE_SIZE: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiConfig {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Command prefix, e.g. `;` for `;compile`.
    pub prefix: String,
    pub wandbox_url: String,
    /// Total time allowed for one remote call, in seconds. `None` waits
    /// for as long as the transport does.
    pub request_timeout: Option<u64>,
    pub broken_compilers: Vec<String>,
    /// Languages left out of the catalog entirely.
    pub broken_languages: Vec<String>,
    /// Authors whose messages are ignored.
    pub blocked_users: Vec<String>,
    /// Largest source file accepted from a `<` link, in bytes.
    pub max_source_size: usize,
    pub success_emoji: Option<EmojiConfig>,
    /// Channel receiving join/leave notices.
    pub join_log: Option<u64>,
    pub stats_api_link: Option<String>,
    pub stats_api_key: Option<String>,
    pub invite_link: Option<String>,
    pub vote_link: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: ";".to_string(),
            wandbox_url: DEFAULT_WANDBOX_URL.to_string(),
            request_timeout: Some(60),
            broken_compilers: DEFAULT_BROKEN_COMPILERS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            broken_languages: DEFAULT_BROKEN_LANGUAGES
                .iter()
                .map(|l| l.to_string())
                .collect(),
            blocked_users: Vec::new(),
            max_source_size: DEFAULT_MAX_SOURCE_SIZE,
            success_emoji: None,
            join_log: None,
            stats_api_link: None,
            stats_api_key: None,
            invite_link: None,
            vote_link: None,
        }
    }
}

impl BotConfig {
    /// Load from `path` (or the default location when it exists), then apply
    /// the process environment. Call [`BotConfig::validate`] once any further
    /// overrides are in place.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading configuration from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Override fields from variables returned by `lookup`. Empty values are
    /// treated as unset.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(prefix) = get("BOT_PREFIX") {
            self.prefix = prefix;
        }
        if let Some(url) = get("WANDBOX_URL") {
            self.wandbox_url = url;
        }
        if let Some(timeout) = get("REQUEST_TIMEOUT") {
            self.request_timeout = Some(parse_number("REQUEST_TIMEOUT", &timeout)?);
        }
        if let Some(compilers) = get("BROKEN_COMPILERS") {
            self.broken_compilers = split_list(&compilers);
        }
        if let Some(languages) = get("BROKEN_LANGUAGES") {
            self.broken_languages = split_list(&languages);
        }
        if let Some(users) = get("BLOCKED_USERS") {
            self.blocked_users = split_list(&users);
        }
        if let Some(size) = get("MAX_SOURCE_SIZE") {
            self.max_source_size = parse_number("MAX_SOURCE_SIZE", &size)?;
        }
        if let (Some(id), Some(name)) = (get("SUCCESS_EMOJI_ID"), get("SUCCESS_EMOJI_NAME")) {
            self.success_emoji = Some(EmojiConfig {
                id: parse_number("SUCCESS_EMOJI_ID", &id)?,
                name,
            });
        }
        if let Some(channel) = get("JOIN_LOG") {
            self.join_log = Some(parse_number("JOIN_LOG", &channel)?);
        }
        if let Some(link) = get("STATS_API_LINK") {
            self.stats_api_link = Some(link);
        }
        if let Some(key) = get("STATS_API_KEY") {
            self.stats_api_key = Some(key);
        }
        if let Some(link) = get("INVITE_LINK") {
            self.invite_link = Some(link);
        }
        if let Some(link) = get("VOTE_LINK") {
            self.vote_link = Some(link);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "prefix".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        url::Url::parse(&self.wandbox_url).map_err(|e| ConfigError::InvalidValue {
            key: "wandbox_url".to_string(),
            reason: e.to_string(),
        })?;

        if let Some(link) = &self.stats_api_link {
            url::Url::parse(link).map_err(|e| ConfigError::InvalidValue {
                key: "stats_api_link".to_string(),
                reason: e.to_string(),
            })?;
        }

        if self.max_source_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_source_size".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.request_timeout == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout.map(Duration::from_secs)
    }

    pub fn deny_list(&self) -> DenyList {
        DenyList::new(self.broken_compilers.iter().cloned())
            .with_languages(&self.broken_languages)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("compiler-bot").join("config.yaml"))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: e.to_string(),
        })
}
