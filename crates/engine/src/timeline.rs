//! Per-topic timestamp runs spanning the whole day.
//!
//! Each run only has live articles for its own hour, so the topic table is
//! rebuilt from the cached entries of every other hour plus this run's
//! articles. Cached entries are added first, in the order they were loaded,
//! and this run's articles are appended after them.

use cache::CacheEntry;
use container::TimestampEntry;
use news::Topic;
use std::collections::HashSet;
use tracing::debug;

/// Accumulated `(time, article id)` runs, indexed by topic slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTimeline {
    runs: Vec<Vec<TimestampEntry>>,
    titles: Vec<String>,
    seen: HashSet<(Topic, u32)>,
}

impl Default for TopicTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicTimeline {
    /// An empty timeline with every slot, including reserved slot 0, empty.
    pub fn new() -> Self {
        Self {
            runs: vec![Vec::new(); Topic::SLOTS],
            titles: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Builds a timeline from previously emitted entries.
    pub fn from_history(entries: &[CacheEntry]) -> Self {
        let mut timeline = Self::new();
        for entry in entries {
            timeline.add_cached(entry);
        }
        timeline
    }

    /// Appends a cached entry to its topic and remembers its title.
    pub fn add_cached(&mut self, entry: &CacheEntry) {
        self.push(entry.topic, entry.timestamp, entry.id);
        self.titles.push(entry.title.clone());
    }

    /// Appends one of this run's articles to its topic.
    pub fn add_current(&mut self, topic: Topic, time: u32, article_id: u32) {
        self.push(topic, time, article_id);
    }

    /// Runs indexed by topic slot; slot 0 is always empty.
    #[must_use]
    pub fn runs(&self) -> &[Vec<TimestampEntry>] {
        &self.runs
    }

    /// Number of entries accumulated for `topic`.
    #[must_use]
    pub fn count(&self, topic: Topic) -> usize {
        self.runs[topic.slot()].len()
    }

    /// Total entries across all topics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Titles of every cached entry, for duplicate screening.
    #[must_use]
    pub fn historical_titles(&self) -> &[String] {
        &self.titles
    }

    fn push(&mut self, topic: Topic, time: u32, article_id: u32) {
        // Ids are only unique within the run that assigned them.
        if !self.seen.insert((topic, article_id)) {
            debug!(%topic, article_id, "duplicate article id in topic timeline");
        }
        self.runs[topic.slot()].push(TimestampEntry { time, article_id });
    }
}
