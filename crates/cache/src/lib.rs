//! # Cache - rolling per-hour article history
//!
//! Every run only sees the articles fetched during the current hour, but the
//! timestamp table in the container must describe the whole day. To bridge
//! that gap each run records what it emitted in a small file keyed by the
//! hour of day, and the next runs read back all the other hours.
//!
//! ## File Layout
//!
//! ```text
//! <cache_dir>/cache_0.news
//! <cache_dir>/cache_1.news
//! ...
//! <cache_dir>/cache_23.news
//! ```
//!
//! Each file is a JSON array of [`CacheEntry`] objects:
//!
//! ```text
//! [{"id":1,"timestamp":13281840,"topic":2,"title":"..."}, ...]
//! ```
//!
//! ## Semantics
//!
//! - A missing file means that hour has not run yet and loads as empty.
//! - A file that exists but does not parse is an error. Topic counts in the
//!   container must match the timestamp runs exactly, so a partially read
//!   history is never acceptable.
//! - Saving replaces the hour's file atomically (write `.tmp`, fsync, rename).
//!
//! ## Example
//!
//! ```rust,no_run
//! use cache::{CacheEntry, HourlyCache};
//! use news::Topic;
//!
//! let store = HourlyCache::new("cache");
//! store.save(3, &[CacheEntry {
//!     id: 1,
//!     timestamp: 13_281_840,
//!     topic: Topic::Sports,
//!     title: "Opening day".to_string(),
//! }]).unwrap();
//!
//! let history = store.load_all_except(4).unwrap();
//! assert_eq!(history.len(), 1);
//! ```

use news::Topic;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Number of hourly slots in the rolling cache.
pub const HOURS_PER_DAY: u8 = 24;

/// The minimal record kept for every article a run emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Article id as assigned by the run that emitted it.
    pub id: u32,
    /// Encoded device time the article was emitted at.
    pub timestamp: u32,
    pub topic: Topic,
    pub title: String,
}

/// Errors that can occur while loading or saving the cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading or writing a cache file failed.
    #[error("cache io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A cache file exists but is not a valid entry list.
    #[error("malformed cache file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An hour outside `0..24` was requested.
    #[error("hour {0} is outside 0..{HOURS_PER_DAY}")]
    InvalidHour(u8),
}

/// Keyed store of per-hour cache files inside one directory.
#[derive(Debug, Clone)]
pub struct HourlyCache {
    dir: PathBuf,
}

impl HourlyCache {
    /// Creates a store rooted at `dir`. Nothing is touched on disk until the
    /// first load or save.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cache file for `hour`.
    pub fn path_for(&self, hour: u8) -> Result<PathBuf, CacheError> {
        if hour >= HOURS_PER_DAY {
            return Err(CacheError::InvalidHour(hour));
        }
        Ok(self.dir.join(format!("cache_{}.news", hour)))
    }

    /// Loads the entries stored for `hour`. A missing file yields an empty list.
    pub fn load_hour(&self, hour: u8) -> Result<Vec<CacheEntry>, CacheError> {
        let path = self.path_for(hour)?;
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(CacheError::Io { path, source }),
        };

        serde_json::from_slice(&data).map_err(|source| CacheError::Malformed { path, source })
    }

    /// Loads every hour except `current_hour`, concatenated in hour order.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable or malformed file; no partial history is
    /// returned.
    pub fn load_all_except(&self, current_hour: u8) -> Result<Vec<CacheEntry>, CacheError> {
        if current_hour >= HOURS_PER_DAY {
            return Err(CacheError::InvalidHour(current_hour));
        }

        let mut history = Vec::new();
        let mut hours_present = 0usize;
        for hour in (0..HOURS_PER_DAY).filter(|h| *h != current_hour) {
            let entries = self.load_hour(hour)?;
            if !entries.is_empty() {
                hours_present += 1;
                debug!(hour, entries = entries.len(), "loaded cache hour");
            }
            history.extend(entries);
        }

        info!(
            current_hour,
            hours = hours_present,
            entries = history.len(),
            "loaded article history"
        );
        Ok(history)
    }

    /// Replaces the file for `hour` with `entries`.
    ///
    /// Creates the cache directory if needed, writes to `cache_<h>.news.tmp`,
    /// fsyncs it and renames it over the previous file. A failed save removes
    /// the temporary file.
    pub fn save(&self, hour: u8, entries: &[CacheEntry]) -> Result<(), CacheError> {
        let path = self.path_for(hour)?;
        fs::create_dir_all(&self.dir).map_err(|source| CacheError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let tmp_path = path.with_extension("news.tmp");
        let swapped = Self::write_entries(&tmp_path, entries).and_then(|()| {
            fs::rename(&tmp_path, &path).map_err(|source| CacheError::Io {
                path: path.clone(),
                source,
            })
        });
        if let Err(e) = swapped {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        info!(hour, entries = entries.len(), path = %path.display(), "saved article cache");
        Ok(())
    }

    fn write_entries(path: &Path, entries: &[CacheEntry]) -> Result<(), CacheError> {
        let io_err = |source| CacheError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(io_err)?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer(&mut writer, entries).map_err(|source| CacheError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(io_err)?;

        let file: File = writer.into_inner().map_err(|e| io_err(e.into_error()))?;
        file.sync_all().map_err(io_err)?;
        Ok(())
    }
}
