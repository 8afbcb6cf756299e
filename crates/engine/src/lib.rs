//! # Engine - hourly news container pipeline
//!
//! Ties the [`cache`], [`news`] and [`container`] crates together into one
//! publish run.
//!
//! ## Pipeline
//!
//! ```text
//! candidates (fetch side)
//!   |
//!   v
//! ┌───────────────────────────────────────────────┐
//! │                    ENGINE                     │
//! │                                               │
//! │ HourlyCache::load_all_except(hour)            │
//! │              |                                │
//! │              v                                │
//! │ TopicTimeline::from_history → titles          │
//! │              |                                │
//! │              v                                │
//! │ select_articles (titles, bodies, caps)        │
//! │              |                                │
//! │              v                                │
//! │ timeline.add_current (ids 1..N, now)          │
//! │              |                                │
//! │              v                                │
//! │ ContainerWriter::write → news.bin.<HH>        │
//! │              |                                │
//! │              v                                │
//! │ HourlyCache::save(hour, this run's entries)   │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module       | Purpose                                              |
//! |--------------|------------------------------------------------------|
//! | [`lib.rs`]   | `NewsEngine`, `RunInput`, `RunReport`, constructor    |
//! | [`timeline`] | Per-topic timestamp accumulation across hours         |
//! | [`run`]      | `run()`: the pipeline above                           |
//!
//! ## Failure
//!
//! Every stage either completes or aborts the run. The container is only
//! published after it was fully built, and the cache for the current hour is
//! only saved after the container was published, so a failed run leaves the
//! previous artifact and cache untouched.

mod run;
mod timeline;

use cache::HourlyCache;
use chrono::{DateTime, Utc};
use config::NewsConfig;
use news::{Rejection, SourceArticle};
use std::path::PathBuf;

pub use timeline::TopicTimeline;

/// Everything one run consumes besides configuration.
#[derive(Debug, Clone)]
pub struct RunInput {
    /// Instant the run happens at; stamped on every fresh article.
    pub now: DateTime<Utc>,
    /// Hour of day (0..24) that names the artifact and cache file.
    pub hour: u8,
    /// Provider logo picture; may be empty.
    pub logo: Vec<u8>,
    /// Candidate articles in fetch order.
    pub candidates: Vec<SourceArticle>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub path: PathBuf,
    pub bytes: usize,
    pub history_entries: usize,
    pub accepted: usize,
    pub rejected: Vec<Rejection>,
    pub images: usize,
}

/// Builds and publishes the container for one hour.
pub struct NewsEngine {
    pub(crate) config: NewsConfig,
    pub(crate) cache: HourlyCache,
}

impl std::fmt::Debug for NewsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsEngine")
            .field("output_dir", &self.config.output_dir)
            .field("cache_dir", &self.cache.dir())
            .field("limits", &self.config.limits)
            .field("language", &self.config.language)
            .field("country", &self.config.country)
            .finish()
    }
}

impl NewsEngine {
    pub fn new(config: NewsConfig) -> Self {
        let cache = HourlyCache::new(&config.cache_dir);
        Self { config, cache }
    }

    #[must_use]
    pub fn config(&self) -> &NewsConfig {
        &self.config
    }

    #[must_use]
    pub fn cache(&self) -> &HourlyCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests;
