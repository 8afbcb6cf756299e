use anyhow::{Context, Result};
use cache::CacheEntry;
use codec::encode_time;
use container::{ContainerInput, ContainerWriter};
use news::{select_articles, SAN_JUAN};
use tracing::info;

use crate::{NewsEngine, RunInput, RunReport, TopicTimeline};

impl NewsEngine {
    /// Runs the full pipeline for `input.hour`.
    ///
    /// # Steps
    ///
    /// 1. Load every cached hour except the current one.
    /// 2. Rebuild the topic timeline and historical titles from it.
    /// 3. Screen the candidates against the titles and the caps.
    /// 4. Append the kept articles to the timeline with ids `1..=N`.
    /// 5. Build the container and publish it atomically.
    /// 6. Save this run's entries as the cache for the current hour.
    ///
    /// # Errors
    ///
    /// Any failure aborts the run. A malformed cache file or a layout error
    /// leaves both the previous artifact and the cache untouched.
    pub fn run(&self, input: RunInput) -> Result<RunReport> {
        let RunInput {
            now,
            hour,
            logo,
            candidates,
        } = input;

        let history = self
            .cache
            .load_all_except(hour)
            .with_context(|| format!("loading article history for hour {}", hour))?;
        let mut timeline = TopicTimeline::from_history(&history);

        let candidate_count = candidates.len();
        let selection = select_articles(candidates, timeline.historical_titles(), self.config.limits);
        info!(
            candidates = candidate_count,
            accepted = selection.accepted.len(),
            rejected = selection.rejected.len(),
            "selected articles"
        );

        let updated = encode_time(now);
        let mut entries = Vec::with_capacity(selection.accepted.len());
        for (position, article) in selection.accepted.iter().enumerate() {
            let id = u32::try_from(position + 1).context("article id overflows u32")?;
            timeline.add_current(article.topic, updated, id);
            entries.push(CacheEntry {
                id,
                timestamp: updated,
                topic: article.topic,
                title: article.title.clone(),
            });
        }

        let path = self.config.artifact_path(hour);
        let container = ContainerInput {
            logo: &logo,
            location: &SAN_JUAN,
            articles: &selection.accepted,
            timestamps: timeline.runs(),
            updated,
            country_code: self.config.country,
            language_code: self.config.language,
        };
        let bytes = ContainerWriter::write(&path, &container)
            .with_context(|| format!("publishing {}", path.display()))?;

        self.cache
            .save(hour, &entries)
            .with_context(|| format!("saving article cache for hour {}", hour))?;

        let images = selection
            .accepted
            .iter()
            .filter(|a| a.picture().is_some())
            .count();

        info!(
            hour,
            path = %path.display(),
            bytes,
            history = history.len(),
            articles = entries.len(),
            images,
            "run complete"
        );

        Ok(RunReport {
            path,
            bytes,
            history_entries: history.len(),
            accepted: entries.len(),
            rejected: selection.rejected,
            images,
        })
    }
}
