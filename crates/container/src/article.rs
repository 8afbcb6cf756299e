//! Article table and article text.
//!
//! Records are created up front with ids `1..=N` in input order, every one
//! pointing at source 0 and location 0 and carrying no picture. The headline
//! and body of each article are then appended to the text segment and the
//! spans patched in. The records are returned unfilled because the image
//! builder still has to link pictures to them.

use news::SourceArticle;

use crate::assembler::Assembler;
use crate::error::{to_u32, ContainerError};
use crate::format::{Section, TableRef};
use crate::records::{ArticleRecord, Record};

/// Draft article records plus the table they will be written into.
#[derive(Debug)]
pub(crate) struct ArticleTable {
    pub table: TableRef,
    pub records: Vec<ArticleRecord>,
}

pub(crate) fn build(
    asm: &mut Assembler,
    articles: &[SourceArticle],
    now: u32,
) -> Result<ArticleTable, ContainerError> {
    let mut records = Vec::with_capacity(articles.len());
    for position in 1..=articles.len() {
        records.push(ArticleRecord {
            id: to_u32("article id", position)?,
            source_index: 0,
            location_index: 0,
            picture: None,
            published: now,
            updated: now,
            ..ArticleRecord::default()
        });
    }

    let table = asm.reserve_fixed_table(Section::ArticleTable, records.len(), ArticleRecord::BYTES)?;

    for (record, article) in records.iter_mut().zip(articles) {
        record.headline = asm.append_text(Section::ArticleText, &article.title)?;
        record.text = asm.append_text(Section::ArticleText, article.body())?;
    }

    Ok(ArticleTable { table, records })
}
