use crate::NewsEngine;
use chrono::{DateTime, TimeZone, Utc};
use config::NewsConfig;
use std::path::Path;

pub fn engine_in(root: &Path) -> NewsEngine {
    NewsEngine::new(NewsConfig {
        output_dir: root.join("out"),
        cache_dir: root.join("cache"),
        ..NewsConfig::default()
    })
}

/// 2024-03-01 07:30:00 UTC.
pub fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 7, 30, 0).unwrap()
}
