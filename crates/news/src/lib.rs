//! # News - article hand-off model
//!
//! Plain in-memory values exchanged between the fetch side and the container
//! layout engine. The fetch side produces [`SourceArticle`]s; the layout
//! engine only ever reads them.
//!
//! ## Topics
//!
//! The channel carries a fixed set of seven English topics. Each topic has a
//! numeric id (`0..=6`, also its serialized form) and a **slot** in the topic
//! table, which is `id + 1` because slot 0 is reserved by the firmware.
//!
//! | id | slot | name               |
//! |----|------|--------------------|
//! | 0  | 1    | National News      |
//! | 1  | 2    | International News |
//! | 2  | 3    | Sports             |
//! | 3  | 4    | Entertainment      |
//! | 4  | 5    | Business           |
//! | 5  | 6    | Science            |
//! | 6  | 7    | Technology         |

mod selection;
mod similarity;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use selection::{
    select_articles, RejectReason, Rejection, Selection, SelectionLimits, DEFAULT_MAX_ARTICLES,
    DEFAULT_MAX_PER_TOPIC,
};
pub use similarity::{is_duplicate_body, is_duplicate_title, quick_ratio, DUPLICATE_RATIO};

/// A news topic. Serialized as its numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Topic {
    NationalNews = 0,
    InternationalNews = 1,
    Sports = 2,
    Entertainment = 3,
    Business = 4,
    Science = 5,
    Technology = 6,
}

/// Returned when a numeric topic id has no matching [`Topic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown topic id {0}")]
pub struct UnknownTopic(pub u8);

impl Topic {
    /// Number of real topics.
    pub const COUNT: usize = 7;

    /// Number of topic table slots, including the reserved slot 0.
    pub const SLOTS: usize = Self::COUNT + 1;

    /// All topics in id order.
    pub const ALL: [Topic; Self::COUNT] = [
        Topic::NationalNews,
        Topic::InternationalNews,
        Topic::Sports,
        Topic::Entertainment,
        Topic::Business,
        Topic::Science,
        Topic::Technology,
    ];

    #[must_use]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Index of this topic in the topic table.
    #[must_use]
    pub fn slot(self) -> usize {
        usize::from(self.id()) + 1
    }

    /// Display name written into the topic text segment.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Topic::NationalNews => "National News",
            Topic::InternationalNews => "International News",
            Topic::Sports => "Sports",
            Topic::Entertainment => "Entertainment",
            Topic::Business => "Business",
            Topic::Science => "Science",
            Topic::Technology => "Technology",
        }
    }
}

impl TryFrom<u8> for Topic {
    type Error = UnknownTopic;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Topic::ALL
            .get(usize::from(id))
            .copied()
            .ok_or(UnknownTopic(id))
    }
}

impl From<Topic> for u8 {
    fn from(topic: Topic) -> Self {
        topic.id()
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A resized picture and its caption, as handed over by the image pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thumbnail {
    /// Encoded JPEG bytes. Empty means the download or resize failed.
    pub image: Vec<u8>,
    /// Caption text; may be empty.
    pub caption: String,
}

/// One fetched article, ready for layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArticle {
    pub title: String,
    pub content: Option<String>,
    pub topic: Topic,
    pub thumbnail: Option<Thumbnail>,
}

impl SourceArticle {
    pub fn new(title: impl Into<String>, topic: Topic) -> Self {
        Self {
            title: title.into(),
            content: None,
            topic,
            thumbnail: None,
        }
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn with_thumbnail(mut self, image: Vec<u8>, caption: impl Into<String>) -> Self {
        self.thumbnail = Some(Thumbnail {
            image,
            caption: caption.into(),
        });
        self
    }

    /// Article body, or the empty string when the feed had none.
    #[must_use]
    pub fn body(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// Returns the thumbnail only if it carries picture bytes.
    #[must_use]
    pub fn picture(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_ref().filter(|t| !t.image.is_empty())
    }
}

/// A geographic location as stored in the location table.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: u8,
    pub region_code: u8,
    pub location_code: u16,
    pub zoom: u8,
}

/// The single location every article is attached to.
pub const SAN_JUAN: Location = Location {
    name: "San Juan",
    latitude: 18.466333,
    longitude: -66.105721,
    country_code: 0,
    region_code: 0,
    location_code: 0,
    zoom: 6,
};

#[cfg(test)]
mod tests;
