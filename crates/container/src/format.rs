//! Container format constants, the canonical section order, and the header.
//!
//! ## Header (64 bytes)
//!
//! ```text
//! 0x00 version   u8        0x01 reserved  u8       0x02 reserved u16
//! 0x04 filesize  u32       0x08 crc32     u32
//! 0x0C updated_1 u32       0x10 updated_2 u32
//! 0x14 country   u8        0x15 language  u8       0x16 reserved u16
//! 0x18 sources   (count u32, offset u32)
//! 0x20 locations (count u32, offset u32)
//! 0x28 topics    (count u32, offset u32)
//! 0x30 articles  (count u32, offset u32)
//! 0x38 images    (count u32, offset u32)
//! ```
//!
//! The CRC32 covers every byte from [`CRC_START`] to the end of the file, so
//! it is computed after `filesize` and every table reference are final.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Result as IoResult, Write};

/// Container format version written to the first header byte.
pub const FORMAT_VERSION: u8 = 0;

/// Size of the encoded header in bytes.
pub const HEADER_BYTES: u32 = 64;

/// First byte covered by the header CRC32 (right after the CRC field).
pub const CRC_START: usize = 12;

/// `PictureIndex` value meaning "this article has no picture".
pub const NO_PICTURE: u32 = u32::MAX;

/// Fixed-size record widths in bytes.
pub const SOURCE_RECORD_BYTES: u32 = 28;
pub const LOCATION_RECORD_BYTES: u32 = 16;
pub const TOPIC_RECORD_BYTES: u32 = 12;
pub const TIMESTAMP_ENTRY_BYTES: u32 = 8;
pub const ARTICLE_RECORD_BYTES: u32 = 44;
pub const IMAGE_RECORD_BYTES: u32 = 24;

/// The sections of a container in the order the firmware expects them.
///
/// The derived `Ord` follows declaration order, which is the file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    SourceTable,
    SourcePictures,
    LocationTable,
    LocationText,
    TopicTable,
    Timestamps,
    TopicText,
    ArticleTable,
    ArticleText,
    ImageTable,
    ImagePictures,
    ImageCaptions,
}

impl Section {
    pub const COUNT: usize = 12;

    pub const ALL: [Section; Self::COUNT] = [
        Section::SourceTable,
        Section::SourcePictures,
        Section::LocationTable,
        Section::LocationText,
        Section::TopicTable,
        Section::Timestamps,
        Section::TopicText,
        Section::ArticleTable,
        Section::ArticleText,
        Section::ImageTable,
        Section::ImagePictures,
        Section::ImageCaptions,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Element count and absolute offset of one fixed table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableRef {
    pub count: u32,
    pub offset: u32,
}

impl TableRef {
    fn write_to<W: Write>(&self, w: &mut W) -> IoResult<()> {
        w.write_u32::<LittleEndian>(self.count)?;
        w.write_u32::<LittleEndian>(self.offset)?;
        Ok(())
    }

    fn read_from<R: Read>(r: &mut R) -> IoResult<Self> {
        let count = r.read_u32::<LittleEndian>()?;
        let offset = r.read_u32::<LittleEndian>()?;
        Ok(Self { count, offset })
    }
}

/// Parsed container header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub version: u8,
    pub filesize: u32,
    pub crc32: u32,
    pub updated_1: u32,
    pub updated_2: u32,
    pub country_code: u8,
    pub language_code: u8,
    pub sources: TableRef,
    pub locations: TableRef,
    pub topics: TableRef,
    pub articles: TableRef,
    pub images: TableRef,
}

impl Header {
    /// Writes the 64-byte header to `w`.
    pub fn write_to<W: Write>(&self, w: &mut W) -> IoResult<()> {
        w.write_u8(self.version)?;
        w.write_u8(0)?;
        w.write_u16::<LittleEndian>(0)?;
        w.write_u32::<LittleEndian>(self.filesize)?;
        w.write_u32::<LittleEndian>(self.crc32)?;
        w.write_u32::<LittleEndian>(self.updated_1)?;
        w.write_u32::<LittleEndian>(self.updated_2)?;
        w.write_u8(self.country_code)?;
        w.write_u8(self.language_code)?;
        w.write_u16::<LittleEndian>(0)?;
        self.sources.write_to(w)?;
        self.locations.write_to(w)?;
        self.topics.write_to(w)?;
        self.articles.write_to(w)?;
        self.images.write_to(w)?;
        Ok(())
    }

    /// Reads a header from `r`. Reserved bytes are skipped, not validated.
    pub fn read_from<R: Read>(r: &mut R) -> IoResult<Self> {
        let version = r.read_u8()?;
        let _ = r.read_u8()?;
        let _ = r.read_u16::<LittleEndian>()?;
        let filesize = r.read_u32::<LittleEndian>()?;
        let crc32 = r.read_u32::<LittleEndian>()?;
        let updated_1 = r.read_u32::<LittleEndian>()?;
        let updated_2 = r.read_u32::<LittleEndian>()?;
        let country_code = r.read_u8()?;
        let language_code = r.read_u8()?;
        let _ = r.read_u16::<LittleEndian>()?;
        Ok(Self {
            version,
            filesize,
            crc32,
            updated_1,
            updated_2,
            country_code,
            language_code,
            sources: TableRef::read_from(r)?,
            locations: TableRef::read_from(r)?,
            topics: TableRef::read_from(r)?,
            articles: TableRef::read_from(r)?,
            images: TableRef::read_from(r)?,
        })
    }
}
