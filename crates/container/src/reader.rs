use codec::{decode_utf16, TERMINATOR_BYTES};
use news::Topic;
use std::io::Cursor;
use std::path::Path;

use crate::error::ContainerError;
use crate::format::{Header, TableRef, CRC_START, HEADER_BYTES};
use crate::records::{
    ArticleRecord, ImageRecord, LocationRecord, Record, SourceRecord, Span, TimestampEntry,
    TopicRecord,
};

/// Decodes a finished container and resolves its offsets.
///
/// On construction the header is validated (size, file length, CRC32) and
/// every fixed table is decoded into memory. Payloads are resolved lazily
/// through [`text`](ContainerReader::text), [`slice`](ContainerReader::slice)
/// and [`topic_entries`](ContainerReader::topic_entries), each of which
/// bounds-checks the offsets it follows.
#[derive(Debug)]
pub struct ContainerReader {
    bytes: Vec<u8>,
    pub header: Header,
    pub sources: Vec<SourceRecord>,
    pub locations: Vec<LocationRecord>,
    pub topics: Vec<TopicRecord>,
    pub articles: Vec<ArticleRecord>,
    pub images: Vec<ImageRecord>,
}

impl ContainerReader {
    /// Reads and decodes the container at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ContainerError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }

    /// Decodes a container held in memory.
    ///
    /// # Errors
    ///
    /// [`ContainerError::Corrupt`] if the buffer is shorter than the header,
    /// its length disagrees with `filesize`, the CRC32 does not match, a
    /// table runs past the end, or a picture index is out of range.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ContainerError> {
        if bytes.len() < HEADER_BYTES as usize {
            return Err(corrupt(format!("{} bytes is too small for a header", bytes.len())));
        }

        let header = Header::read_from(&mut Cursor::new(&bytes[..HEADER_BYTES as usize]))?;

        if header.filesize as usize != bytes.len() {
            return Err(corrupt(format!(
                "header filesize {} but buffer has {} bytes",
                header.filesize,
                bytes.len()
            )));
        }

        let crc = crc32fast::hash(&bytes[CRC_START..]);
        if crc != header.crc32 {
            return Err(corrupt(format!(
                "crc mismatch: header {:#010x}, computed {:#010x}",
                header.crc32, crc
            )));
        }

        let sources = read_table(&bytes, header.sources)?;
        let locations = read_table(&bytes, header.locations)?;
        let topics = read_table(&bytes, header.topics)?;
        let articles: Vec<ArticleRecord> = read_table(&bytes, header.articles)?;
        let images = read_table(&bytes, header.images)?;

        for article in &articles {
            if let Some(picture) = article.picture {
                if picture.index >= header.images.count {
                    return Err(corrupt(format!(
                        "article {} points at image {} of {}",
                        article.id, picture.index, header.images.count
                    )));
                }
            }
        }

        Ok(Self {
            bytes,
            header,
            sources,
            locations,
            topics,
            articles,
            images,
        })
    }

    /// The raw container bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes covered by `span`.
    pub fn slice(&self, span: Span) -> Result<&[u8], ContainerError> {
        let start = span.offset as usize;
        let end = start + span.size as usize;
        self.bytes
            .get(start..end)
            .ok_or_else(|| corrupt(format!("span {}+{} out of bounds", span.offset, span.size)))
    }

    /// Decodes the UTF-16 string covered by `span` and checks that its
    /// terminator follows it. An empty span decodes to `""`.
    pub fn text(&self, span: Span) -> Result<String, ContainerError> {
        if span.is_empty() {
            return Ok(String::new());
        }
        let end = span.offset as usize + span.size as usize;
        match self.bytes.get(end..end + TERMINATOR_BYTES) {
            Some([0, 0]) => {}
            _ => {
                return Err(corrupt(format!(
                    "text at {} is not null-terminated",
                    span.offset
                )))
            }
        }
        Ok(decode_utf16(self.slice(span)?)?)
    }

    /// Decodes a null-terminated UTF-16 string starting at `offset`.
    pub fn text_at(&self, offset: u32) -> Result<String, ContainerError> {
        let start = offset as usize;
        let tail = self
            .bytes
            .get(start..)
            .ok_or_else(|| corrupt(format!("text offset {} out of bounds", offset)))?;

        let units = tail
            .chunks_exact(2)
            .position(|pair| pair == [0, 0])
            .ok_or_else(|| corrupt(format!("text at {} is not null-terminated", offset)))?;

        Ok(decode_utf16(&tail[..units * 2])?)
    }

    /// Timestamp run of topic table slot `slot`.
    pub fn topic_entries(&self, slot: usize) -> Result<Vec<TimestampEntry>, ContainerError> {
        let topic = self
            .topics
            .get(slot)
            .ok_or_else(|| corrupt(format!("topic slot {} out of range", slot)))?;
        read_table(
            &self.bytes,
            TableRef {
                count: topic.article_count,
                offset: topic.timestamp_offset,
            },
        )
    }

    /// Name of topic table slot `slot`; the reserved slot 0 has none.
    pub fn topic_name(&self, slot: usize) -> Result<Option<String>, ContainerError> {
        if slot == 0 || slot >= Topic::SLOTS {
            return Ok(None);
        }
        match self.topics.get(slot) {
            Some(topic) => Ok(Some(self.text_at(topic.text_offset)?)),
            None => Ok(None),
        }
    }

    pub fn headline(&self, article: &ArticleRecord) -> Result<String, ContainerError> {
        self.text(article.headline)
    }

    pub fn article_text(&self, article: &ArticleRecord) -> Result<String, ContainerError> {
        self.text(article.text)
    }

    /// Image record linked to `article`, if any.
    #[must_use]
    pub fn image_for(&self, article: &ArticleRecord) -> Option<&ImageRecord> {
        article
            .picture
            .and_then(|p| self.images.get(p.index as usize))
    }
}

fn read_table<R: Record>(bytes: &[u8], table: TableRef) -> Result<Vec<R>, ContainerError> {
    let start = table.offset as usize;
    let len = table.count as usize * R::BYTES as usize;
    let raw = bytes.get(start..start + len).ok_or_else(|| {
        corrupt(format!(
            "table of {} x {} bytes at {} runs past end",
            table.count,
            R::BYTES,
            table.offset
        ))
    })?;

    let mut cursor = Cursor::new(raw);
    (0..table.count)
        .map(|_| R::read_from(&mut cursor).map_err(ContainerError::from))
        .collect()
}

fn corrupt(msg: String) -> ContainerError {
    ContainerError::Corrupt(msg)
}
