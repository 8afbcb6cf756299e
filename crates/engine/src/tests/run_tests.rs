use super::helpers::{engine_in, morning};
use crate::*;
use anyhow::Result;
use cache::{CacheEntry, HourlyCache};
use codec::encode_time;
use config::NewsConfig;
use container::{ContainerReader, TimestampEntry};
use news::{RejectReason, SelectionLimits, SourceArticle, Topic};
use std::fs;
use tempfile::tempdir;

fn run_input(hour: u8, candidates: Vec<SourceArticle>) -> RunInput {
    RunInput {
        now: morning(),
        hour,
        logo: b"logo".to_vec(),
        candidates,
    }
}

// --------------------- Publish + cache ---------------------

#[test]
fn run_publishes_container_and_saves_cache() -> Result<()> {
    let dir = tempdir()?;
    let engine = engine_in(dir.path());

    let report = engine.run(run_input(
        7,
        vec![
            SourceArticle::new("Harbor reopens", Topic::NationalNews)
                .with_content("Ships return after the storm.")
                .with_thumbnail(vec![1, 2, 3, 4], "The harbor"),
            SourceArticle::new("Markets rally", Topic::Business).with_content("Stocks climbed."),
        ],
    ))?;

    assert_eq!(report.path, dir.path().join("out/v2/1/049/news.bin.07"));
    assert_eq!(report.accepted, 2);
    assert_eq!(report.images, 1);
    assert_eq!(report.history_entries, 0);
    assert_eq!(fs::metadata(&report.path)?.len() as usize, report.bytes);

    let reader = ContainerReader::open(&report.path)?;
    assert_eq!(reader.header.articles.count, 2);
    assert_eq!(reader.header.images.count, 1);
    assert_eq!(reader.header.updated_1, encode_time(morning()));
    assert_eq!(reader.headline(&reader.articles[1])?, "Markets rally");
    assert_eq!(reader.slice(reader.sources[0].picture)?, b"logo");

    let saved = HourlyCache::new(dir.path().join("cache")).load_hour(7)?;
    let now = encode_time(morning());
    assert_eq!(
        saved,
        vec![
            CacheEntry {
                id: 1,
                timestamp: now,
                topic: Topic::NationalNews,
                title: "Harbor reopens".into(),
            },
            CacheEntry {
                id: 2,
                timestamp: now,
                topic: Topic::Business,
                title: "Markets rally".into(),
            },
        ]
    );
    Ok(())
}

#[test]
fn cached_hour_and_fresh_article_share_topic_run() -> Result<()> {
    let dir = tempdir()?;
    let engine = engine_in(dir.path());
    let t0 = encode_time(morning()) - 4 * 60;

    engine.cache().save(
        3,
        &[CacheEntry {
            id: 5,
            timestamp: t0,
            topic: Topic::Sports,
            title: "Earlier match".into(),
        }],
    )?;

    let report = engine.run(run_input(7, vec![SourceArticle::new("Late goal", Topic::Sports)]))?;
    assert_eq!(report.history_entries, 1);

    let reader = ContainerReader::open(&report.path)?;
    let slot = Topic::Sports.slot();
    assert_eq!(reader.topics[slot].article_count, 2);
    assert_eq!(
        reader.topic_entries(slot)?,
        vec![
            TimestampEntry { time: t0, article_id: 5 },
            TimestampEntry {
                time: encode_time(morning()),
                article_id: 1,
            },
        ]
    );
    assert_eq!(reader.articles.len(), 1);
    assert_eq!(reader.articles[0].id, 1);
    Ok(())
}

#[test]
fn current_hour_cache_is_ignored_then_replaced() -> Result<()> {
    let dir = tempdir()?;
    let engine = engine_in(dir.path());

    engine.cache().save(
        7,
        &[CacheEntry {
            id: 9,
            timestamp: 1,
            topic: Topic::Science,
            title: "Stale".into(),
        }],
    )?;

    let report = engine.run(run_input(7, vec![SourceArticle::new("Stale", Topic::Science)]))?;
    // Same title as the current hour's old file, but that file is not history.
    assert_eq!(report.accepted, 1);
    assert_eq!(report.history_entries, 0);

    let reader = ContainerReader::open(&report.path)?;
    assert_eq!(reader.topics[Topic::Science.slot()].article_count, 1);

    let saved = engine.cache().load_hour(7)?;
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, 1);
    Ok(())
}

// --------------------- Screening ---------------------

#[test]
fn historical_titles_are_screened_case_insensitively() -> Result<()> {
    let dir = tempdir()?;
    let engine = engine_in(dir.path());
    engine.cache().save(
        2,
        &[CacheEntry {
            id: 1,
            timestamp: 10,
            topic: Topic::Technology,
            title: "New Phone Launch".into(),
        }],
    )?;

    let report = engine.run(run_input(
        8,
        vec![
            SourceArticle::new("new phone launch", Topic::Technology),
            SourceArticle::new("Satellite deployed", Topic::Science),
        ],
    ))?;

    assert_eq!(report.accepted, 1);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].reason, RejectReason::SeenTitle);

    let reader = ContainerReader::open(&report.path)?;
    assert_eq!(reader.headline(&reader.articles[0])?, "Satellite deployed");
    // The cached article still counts toward its topic.
    assert_eq!(reader.topics[Topic::Technology.slot()].article_count, 1);
    Ok(())
}

#[test]
fn caps_from_config_are_applied() -> Result<()> {
    let dir = tempdir()?;
    let engine = NewsEngine::new(NewsConfig {
        output_dir: dir.path().join("out"),
        cache_dir: dir.path().join("cache"),
        limits: SelectionLimits {
            max_articles: 3,
            max_per_topic: 2,
        },
        ..NewsConfig::default()
    });

    let candidates = vec![
        SourceArticle::new("one", Topic::Sports).with_content("alpha match report"),
        SourceArticle::new("two", Topic::Sports).with_content("beta transfer window"),
        SourceArticle::new("three", Topic::Sports).with_content("gamma injury news"),
        SourceArticle::new("four", Topic::Business).with_content("delta earnings call"),
        SourceArticle::new("five", Topic::Business).with_content("epsilon merger talks"),
    ];
    let report = engine.run(run_input(12, candidates))?;

    assert_eq!(report.accepted, 3);
    let reasons: Vec<RejectReason> = report.rejected.iter().map(|r| r.reason).collect();
    assert_eq!(reasons, vec![RejectReason::TopicFull, RejectReason::Overflow]);
    Ok(())
}

// --------------------- Failure ---------------------

#[test]
fn malformed_cache_aborts_before_publishing() -> Result<()> {
    let dir = tempdir()?;
    let engine = engine_in(dir.path());
    fs::create_dir_all(dir.path().join("cache"))?;
    fs::write(dir.path().join("cache/cache_4.news"), b"{not json")?;

    let result = engine.run(run_input(7, vec![SourceArticle::new("A", Topic::Sports)]));
    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("cache_4.news"));

    assert!(!engine.config().artifact_path(7).exists());
    assert!(!dir.path().join("cache/cache_7.news").exists());
    Ok(())
}

#[test]
fn failed_publish_leaves_cache_untouched() -> Result<()> {
    let dir = tempdir()?;
    // A regular file where the output directory should be.
    let blocker = dir.path().join("out");
    fs::write(&blocker, b"")?;
    let engine = engine_in(dir.path());

    let result = engine.run(run_input(7, vec![SourceArticle::new("A", Topic::Sports)]));
    assert!(result.is_err());
    assert!(!dir.path().join("cache/cache_7.news").exists());
    Ok(())
}

#[test]
fn hour_out_of_range_is_rejected() {
    let dir = tempdir().unwrap();
    let engine = engine_in(dir.path());
    assert!(engine.run(run_input(24, Vec::new())).is_err());
}

#[test]
fn empty_run_still_publishes() -> Result<()> {
    let dir = tempdir()?;
    let engine = engine_in(dir.path());

    let report = engine.run(run_input(0, Vec::new()))?;
    assert_eq!(report.accepted, 0);

    let reader = ContainerReader::open(&report.path)?;
    assert_eq!(reader.header.articles.count, 0);
    assert!(engine.cache().load_hour(0)?.is_empty());
    Ok(())
}
