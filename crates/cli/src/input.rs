//! Reading the fetch side's hand-off file.
//!
//! ```json
//! [
//!   {
//!     "title": "Harbor reopens",
//!     "content": "Ships return after the storm.",
//!     "topic": 0,
//!     "thumbnail": { "image": "img/harbor.jpg", "caption": "The harbor" }
//!   }
//! ]
//! ```
//!
//! `topic` is the numeric topic id. Image paths are resolved against the
//! directory holding the JSON file. An image that cannot be read is the same
//! as a failed download: the article is kept without a picture.

use anyhow::{Context, Result};
use news::{SourceArticle, Thumbnail, Topic};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: String,
    #[serde(default)]
    content: Option<String>,
    topic: Topic,
    #[serde(default)]
    thumbnail: Option<RawThumbnail>,
}

#[derive(Debug, Deserialize)]
struct RawThumbnail {
    image: String,
    #[serde(default)]
    caption: String,
}

/// Loads the candidate articles listed in `path`, in file order.
pub fn load_articles(path: &Path) -> Result<Vec<SourceArticle>> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let articles: Vec<RawArticle> =
        serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(articles
        .into_iter()
        .map(|raw| {
            let thumbnail = raw.thumbnail.map(|thumb| {
                let image_path = base.join(&thumb.image);
                let image = fs::read(&image_path).unwrap_or_else(|e| {
                    warn!(path = %image_path.display(), error = %e, "thumbnail unreadable, skipping picture");
                    Vec::new()
                });
                Thumbnail {
                    image,
                    caption: thumb.caption,
                }
            });
            SourceArticle {
                title: raw.title,
                content: raw.content,
                topic: raw.topic,
                thumbnail,
            }
        })
        .collect())
}
