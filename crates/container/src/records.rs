//! Fixed-size records stored in the container tables.
//!
//! Every record is a plain value while the layout is being computed. Builders
//! keep them in a `Vec`, patch fields by index once payload offsets are known,
//! and serialize the finished vector into the space reserved for the table.
//!
//! All integers are little-endian.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Result as IoResult, Write};

use crate::format::{
    ARTICLE_RECORD_BYTES, IMAGE_RECORD_BYTES, LOCATION_RECORD_BYTES, NO_PICTURE,
    SOURCE_RECORD_BYTES, TIMESTAMP_ENTRY_BYTES, TOPIC_RECORD_BYTES,
};

/// A fixed-width table record.
pub trait Record: Sized {
    /// Encoded width in bytes.
    const BYTES: u32;

    fn write_to<W: Write>(&self, w: &mut W) -> IoResult<()>;

    fn read_from<R: Read>(r: &mut R) -> IoResult<Self>;
}

/// A `(size, offset)` pair pointing at a payload. Both zero means "absent".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    /// Payload length in bytes, excluding any terminator or padding.
    pub size: u32,
    /// Absolute offset of the first payload byte.
    pub offset: u32,
}

impl Span {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0 && self.offset == 0
    }

    fn write_to<W: Write>(&self, w: &mut W) -> IoResult<()> {
        w.write_u32::<LittleEndian>(self.size)?;
        w.write_u32::<LittleEndian>(self.offset)
    }

    fn read_from<R: Read>(r: &mut R) -> IoResult<Self> {
        let size = r.read_u32::<LittleEndian>()?;
        let offset = r.read_u32::<LittleEndian>()?;
        Ok(Self { size, offset })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceRecord {
    pub logo: u8,
    pub position: u8,
    pub picture: Span,
    pub name: Span,
    pub copyright: Span,
}

impl Record for SourceRecord {
    const BYTES: u32 = SOURCE_RECORD_BYTES;

    fn write_to<W: Write>(&self, w: &mut W) -> IoResult<()> {
        w.write_u8(self.logo)?;
        w.write_u8(self.position)?;
        w.write_u16::<LittleEndian>(0)?;
        self.picture.write_to(w)?;
        self.name.write_to(w)?;
        self.copyright.write_to(w)
    }

    fn read_from<R: Read>(r: &mut R) -> IoResult<Self> {
        let logo = r.read_u8()?;
        let position = r.read_u8()?;
        let _ = r.read_u16::<LittleEndian>()?;
        Ok(Self {
            logo,
            position,
            picture: Span::read_from(r)?,
            name: Span::read_from(r)?,
            copyright: Span::read_from(r)?,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationRecord {
    pub text_offset: u32,
    pub latitude: i16,
    pub longitude: i16,
    pub country_code: u8,
    pub region_code: u8,
    pub location_code: u16,
    pub zoom: u8,
}

impl Record for LocationRecord {
    const BYTES: u32 = LOCATION_RECORD_BYTES;

    fn write_to<W: Write>(&self, w: &mut W) -> IoResult<()> {
        w.write_u32::<LittleEndian>(self.text_offset)?;
        w.write_i16::<LittleEndian>(self.latitude)?;
        w.write_i16::<LittleEndian>(self.longitude)?;
        w.write_u8(self.country_code)?;
        w.write_u8(self.region_code)?;
        w.write_u16::<LittleEndian>(self.location_code)?;
        w.write_u8(self.zoom)?;
        w.write_all(&[0u8; 3])
    }

    fn read_from<R: Read>(r: &mut R) -> IoResult<Self> {
        let text_offset = r.read_u32::<LittleEndian>()?;
        let latitude = r.read_i16::<LittleEndian>()?;
        let longitude = r.read_i16::<LittleEndian>()?;
        let country_code = r.read_u8()?;
        let region_code = r.read_u8()?;
        let location_code = r.read_u16::<LittleEndian>()?;
        let zoom = r.read_u8()?;
        let mut pad = [0u8; 3];
        r.read_exact(&mut pad)?;
        Ok(Self {
            text_offset,
            latitude,
            longitude,
            country_code,
            region_code,
            location_code,
            zoom,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopicRecord {
    pub text_offset: u32,
    pub article_count: u32,
    pub timestamp_offset: u32,
}

impl Record for TopicRecord {
    const BYTES: u32 = TOPIC_RECORD_BYTES;

    fn write_to<W: Write>(&self, w: &mut W) -> IoResult<()> {
        w.write_u32::<LittleEndian>(self.text_offset)?;
        w.write_u32::<LittleEndian>(self.article_count)?;
        w.write_u32::<LittleEndian>(self.timestamp_offset)
    }

    fn read_from<R: Read>(r: &mut R) -> IoResult<Self> {
        Ok(Self {
            text_offset: r.read_u32::<LittleEndian>()?,
            article_count: r.read_u32::<LittleEndian>()?,
            timestamp_offset: r.read_u32::<LittleEndian>()?,
        })
    }
}

/// One `(time, article id)` pair in a topic's timestamp run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimestampEntry {
    pub time: u32,
    pub article_id: u32,
}

impl Record for TimestampEntry {
    const BYTES: u32 = TIMESTAMP_ENTRY_BYTES;

    fn write_to<W: Write>(&self, w: &mut W) -> IoResult<()> {
        w.write_u32::<LittleEndian>(self.time)?;
        w.write_u32::<LittleEndian>(self.article_id)
    }

    fn read_from<R: Read>(r: &mut R) -> IoResult<Self> {
        Ok(Self {
            time: r.read_u32::<LittleEndian>()?,
            article_id: r.read_u32::<LittleEndian>()?,
        })
    }
}

/// Link from an article to its entry in the image table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PictureRef {
    pub index: u32,
    pub timestamp: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArticleRecord {
    pub id: u32,
    pub source_index: u32,
    pub location_index: u32,
    /// `None` is written as index [`NO_PICTURE`] with timestamp 0.
    pub picture: Option<PictureRef>,
    pub published: u32,
    pub updated: u32,
    pub headline: Span,
    pub text: Span,
}

impl Record for ArticleRecord {
    const BYTES: u32 = ARTICLE_RECORD_BYTES;

    fn write_to<W: Write>(&self, w: &mut W) -> IoResult<()> {
        let (picture_timestamp, picture_index) = match self.picture {
            Some(p) => (p.timestamp, p.index),
            None => (0, NO_PICTURE),
        };
        w.write_u32::<LittleEndian>(self.id)?;
        w.write_u32::<LittleEndian>(self.source_index)?;
        w.write_u32::<LittleEndian>(self.location_index)?;
        w.write_u32::<LittleEndian>(picture_timestamp)?;
        w.write_u32::<LittleEndian>(picture_index)?;
        w.write_u32::<LittleEndian>(self.published)?;
        w.write_u32::<LittleEndian>(self.updated)?;
        self.headline.write_to(w)?;
        self.text.write_to(w)
    }

    fn read_from<R: Read>(r: &mut R) -> IoResult<Self> {
        let id = r.read_u32::<LittleEndian>()?;
        let source_index = r.read_u32::<LittleEndian>()?;
        let location_index = r.read_u32::<LittleEndian>()?;
        let picture_timestamp = r.read_u32::<LittleEndian>()?;
        let picture_index = r.read_u32::<LittleEndian>()?;
        let picture = (picture_index != NO_PICTURE).then_some(PictureRef {
            index: picture_index,
            timestamp: picture_timestamp,
        });
        Ok(Self {
            id,
            source_index,
            location_index,
            picture,
            published: r.read_u32::<LittleEndian>()?,
            updated: r.read_u32::<LittleEndian>()?,
            headline: Span::read_from(r)?,
            text: Span::read_from(r)?,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageRecord {
    pub credit: Span,
    pub caption: Span,
    pub picture: Span,
}

impl Record for ImageRecord {
    const BYTES: u32 = IMAGE_RECORD_BYTES;

    fn write_to<W: Write>(&self, w: &mut W) -> IoResult<()> {
        self.credit.write_to(w)?;
        self.caption.write_to(w)?;
        self.picture.write_to(w)
    }

    fn read_from<R: Read>(r: &mut R) -> IoResult<Self> {
        Ok(Self {
            credit: Span::read_from(r)?,
            caption: Span::read_from(r)?,
            picture: Span::read_from(r)?,
        })
    }
}
