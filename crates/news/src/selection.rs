//! Candidate screening applied before layout.
//!
//! Walks the candidates in input order and keeps an article unless its title
//! was already published in an earlier hour, its body is a near-copy of an
//! article kept earlier in this run, its topic is full, or the overall cap
//! has been reached.

use tracing::warn;

use crate::{is_duplicate_body, is_duplicate_title, SourceArticle, Topic};

/// Default overall article cap per run.
pub const DEFAULT_MAX_ARTICLES: usize = 15;

/// Default cap per topic per run.
pub const DEFAULT_MAX_PER_TOPIC: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionLimits {
    pub max_articles: usize,
    pub max_per_topic: usize,
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            max_articles: DEFAULT_MAX_ARTICLES,
            max_per_topic: DEFAULT_MAX_PER_TOPIC,
        }
    }
}

/// Why a candidate was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Title matches a title from the historical cache.
    SeenTitle,
    /// Body is a near-duplicate of an article kept earlier in this run.
    SimilarBody,
    /// The article's topic already holds `max_per_topic` articles.
    TopicFull,
    /// `max_articles` articles were already kept.
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub title: String,
    pub topic: Topic,
    pub reason: RejectReason,
}

/// Result of [`select_articles`].
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Kept articles, in input order.
    pub accepted: Vec<SourceArticle>,
    pub rejected: Vec<Rejection>,
}

/// Screens `candidates` against `history_titles` and `limits`.
pub fn select_articles<S: AsRef<str>>(
    candidates: Vec<SourceArticle>,
    history_titles: &[S],
    limits: SelectionLimits,
) -> Selection {
    let mut selection = Selection::default();
    let mut per_topic = [0usize; Topic::COUNT];
    let mut bodies: Vec<String> = Vec::new();

    for article in candidates {
        let reason = if selection.accepted.len() >= limits.max_articles {
            Some(RejectReason::Overflow)
        } else if is_duplicate_title(&article.title, history_titles) {
            Some(RejectReason::SeenTitle)
        } else if !article.body().is_empty() && is_duplicate_body(article.body(), &bodies) {
            Some(RejectReason::SimilarBody)
        } else if per_topic[usize::from(article.topic.id())] >= limits.max_per_topic {
            Some(RejectReason::TopicFull)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                warn!(title = %article.title, topic = %article.topic, ?reason, "dropping article");
                selection.rejected.push(Rejection {
                    title: article.title,
                    topic: article.topic,
                    reason,
                });
            }
            None => {
                per_topic[usize::from(article.topic.id())] += 1;
                if !article.body().is_empty() {
                    bodies.push(article.body().to_string());
                }
                selection.accepted.push(article);
            }
        }
    }

    selection
}
