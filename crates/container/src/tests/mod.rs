use crate::{ContainerInput, ContainerWriter, TimestampEntry};
use news::{SourceArticle, Topic, SAN_JUAN};

mod reader_tests;

pub(crate) const NOW: u32 = 13_000_000;

pub(crate) fn sample_articles() -> Vec<SourceArticle> {
    vec![
        SourceArticle::new("Storm nears coast", Topic::NationalNews)
            .with_content("Residents are told to prepare.")
            .with_thumbnail(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x01], "Clouds over the bay"),
        SourceArticle::new("Cup final tonight", Topic::Sports),
        SourceArticle::new("Chip shortage eases", Topic::Technology)
            .with_content("Supply is recovering.")
            .with_thumbnail(vec![1, 2, 3], ""),
        SourceArticle::new("Telescope offline", Topic::Science)
            .with_content("Repairs start Monday.")
            .with_thumbnail(Vec::new(), "never written"),
    ]
}

/// One fresh entry per article, ids assigned in input order.
pub(crate) fn fresh_timestamps(articles: &[SourceArticle]) -> Vec<Vec<TimestampEntry>> {
    let mut runs = vec![Vec::new(); Topic::SLOTS];
    for (i, article) in articles.iter().enumerate() {
        runs[article.topic.slot()].push(TimestampEntry {
            time: NOW,
            article_id: i as u32 + 1,
        });
    }
    runs
}

pub(crate) fn input<'a>(
    logo: &'a [u8],
    articles: &'a [SourceArticle],
    timestamps: &'a [Vec<TimestampEntry>],
) -> ContainerInput<'a> {
    ContainerInput {
        logo,
        location: &SAN_JUAN,
        articles,
        timestamps,
        updated: NOW,
        country_code: 49,
        language_code: 1,
    }
}

pub(crate) fn build_sample() -> Vec<u8> {
    let articles = sample_articles();
    let timestamps = fresh_timestamps(&articles);
    ContainerWriter::build(&input(b"LOGO!", &articles, &timestamps)).unwrap()
}

pub(crate) fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}
