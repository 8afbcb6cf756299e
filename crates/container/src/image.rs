//! Image table, picture data and captions.
//!
//! Only articles whose thumbnail carries picture bytes get an image record.
//! Image indices follow the article order. All pictures are written before
//! any caption, and each picture links back to its article record.

use news::{SourceArticle, Thumbnail};

use crate::assembler::Assembler;
use crate::error::{to_u32, ContainerError};
use crate::format::{Section, TableRef};
use crate::records::{ArticleRecord, ImageRecord, PictureRef, Record};

/// `articles` and `records` must be parallel slices.
pub(crate) fn build(
    asm: &mut Assembler,
    articles: &[SourceArticle],
    records: &mut [ArticleRecord],
    now: u32,
) -> Result<TableRef, ContainerError> {
    let with_pictures: Vec<(usize, &Thumbnail)> = articles
        .iter()
        .enumerate()
        .filter_map(|(i, article)| article.picture().map(|thumb| (i, thumb)))
        .collect();

    let table = asm.reserve_fixed_table(Section::ImageTable, with_pictures.len(), ImageRecord::BYTES)?;
    let mut images = vec![ImageRecord::default(); with_pictures.len()];

    for (index, (article_index, thumb)) in with_pictures.iter().enumerate() {
        images[index].picture = asm.append_blob(Section::ImagePictures, &thumb.image)?;
        records[*article_index].picture = Some(PictureRef {
            index: to_u32("picture index", index)?,
            timestamp: now,
        });
    }

    for (index, (_, thumb)) in with_pictures.iter().enumerate() {
        if !thumb.caption.is_empty() {
            images[index].caption = asm.append_text(Section::ImageCaptions, &thumb.caption)?;
        }
    }

    asm.fill_table(Section::ImageTable, &images)?;
    Ok(table)
}
