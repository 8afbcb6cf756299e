use anyhow::Result;
use codec::decode_time;
use container::ContainerReader;
use news::Topic;
use std::fmt::Write;

/// Human-readable summary of a decoded container.
pub fn describe(reader: &ContainerReader) -> Result<String> {
    let h = &reader.header;
    let mut out = String::new();

    writeln!(
        out,
        "version {}, {} bytes, crc {:#010x}",
        h.version, h.filesize, h.crc32
    )?;
    writeln!(
        out,
        "updated {} (country {}, language {})",
        decode_time(h.updated_1).to_rfc3339(),
        h.country_code,
        h.language_code
    )?;
    for (name, table) in [
        ("sources", h.sources),
        ("locations", h.locations),
        ("topics", h.topics),
        ("articles", h.articles),
        ("images", h.images),
    ] {
        writeln!(out, "{:<10}{:>4} @ {}", name, table.count, table.offset)?;
    }

    for location in &reader.locations {
        writeln!(
            out,
            "location: {} ({}, {}) zoom {}",
            reader.text_at(location.text_offset)?,
            location.latitude,
            location.longitude,
            location.zoom
        )?;
    }

    writeln!(out, "topics:")?;
    for topic in Topic::ALL {
        let slot = topic.slot();
        let name = reader.topic_name(slot)?.unwrap_or_default();
        let count = reader.topics.get(slot).map_or(0, |t| t.article_count);
        writeln!(out, "  {:<20}{:>4}", name, count)?;
    }

    writeln!(out, "articles:")?;
    for article in &reader.articles {
        let picture = match article.picture {
            Some(p) => format!("pic {}", p.index),
            None => "-".to_string(),
        };
        writeln!(out, "  #{:<3} [{}] {}", article.id, picture, reader.headline(article)?)?;
    }

    Ok(out)
}
