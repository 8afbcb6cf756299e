//! # Config - run settings for the news builder
//!
//! Every setting comes from an environment variable with a default, the same
//! way for the CLI and for anything embedding the engine.
//!
//! ```text
//! NEWS_OUTPUT_DIR     artifact root                  (default: "out")
//! NEWS_CACHE_DIR      hourly history directory       (default: "cache")
//! NEWS_LOGO_PATH      provider logo picture          (default: unset, no logo)
//! NEWS_MAX_ARTICLES   articles kept per run          (default: 15)
//! NEWS_MAX_PER_TOPIC  articles kept per topic        (default: 3)
//! NEWS_LANGUAGE       language code                  (default: 1, English)
//! NEWS_COUNTRY        country code                   (default: 49, USA)
//! ```
//!
//! Unlike a REPL, a scheduled publish should not silently fall back when a
//! number is mistyped, so unparsable values are an error.

use news::SelectionLimits;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const ENV_OUTPUT_DIR: &str = "NEWS_OUTPUT_DIR";
pub const ENV_CACHE_DIR: &str = "NEWS_CACHE_DIR";
pub const ENV_LOGO_PATH: &str = "NEWS_LOGO_PATH";
pub const ENV_MAX_ARTICLES: &str = "NEWS_MAX_ARTICLES";
pub const ENV_MAX_PER_TOPIC: &str = "NEWS_MAX_PER_TOPIC";
pub const ENV_LANGUAGE: &str = "NEWS_LANGUAGE";
pub const ENV_COUNTRY: &str = "NEWS_COUNTRY";

/// English.
pub const DEFAULT_LANGUAGE: u8 = 1;
/// United States.
pub const DEFAULT_COUNTRY: u8 = 49;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?} is not a valid {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Settings for one publish run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsConfig {
    pub output_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub logo_path: Option<PathBuf>,
    pub limits: SelectionLimits,
    pub language: u8,
    pub country: u8,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("out"),
            cache_dir: PathBuf::from("cache"),
            logo_path: None,
            limits: SelectionLimits::default(),
            language: DEFAULT_LANGUAGE,
            country: DEFAULT_COUNTRY,
        }
    }
}

impl NewsConfig {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the settings through `lookup`, which returns `None` for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            output_dir: var(ENV_OUTPUT_DIR).map_or(defaults.output_dir, PathBuf::from),
            cache_dir: var(ENV_CACHE_DIR).map_or(defaults.cache_dir, PathBuf::from),
            logo_path: var(ENV_LOGO_PATH).map(PathBuf::from),
            limits: SelectionLimits {
                max_articles: parse_or(ENV_MAX_ARTICLES, var(ENV_MAX_ARTICLES), defaults.limits.max_articles)?,
                max_per_topic: parse_or(ENV_MAX_PER_TOPIC, var(ENV_MAX_PER_TOPIC), defaults.limits.max_per_topic)?,
            },
            language: parse_or(ENV_LANGUAGE, var(ENV_LANGUAGE), defaults.language)?,
            country: parse_or(ENV_COUNTRY, var(ENV_COUNTRY), defaults.country)?,
        })
    }

    /// Where the container for `hour` is published:
    /// `<output_dir>/v2/<language>/<country, 3 digits>/news.bin.<hour, 2 digits>`.
    #[must_use]
    pub fn artifact_path(&self, hour: u8) -> PathBuf {
        self.output_dir
            .join("v2")
            .join(self.language.to_string())
            .join(format!("{:03}", self.country))
            .join(format!("news.bin.{:02}", hour))
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected: std::any::type_name::<T>(),
            value,
        }),
    }
}
