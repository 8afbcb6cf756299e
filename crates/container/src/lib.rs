//! # Container - news channel binary layout
//!
//! Builds the single binary file the console's news channel downloads for a
//! country/language pair. The file is a header followed by twelve sections
//! in a fixed order. Every table and payload is located by an absolute
//! offset stored elsewhere in the file.
//!
//! ## File layout
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ HEADER (64 bytes, see `format`)                               │
//! │ version | filesize | crc32 | updated x2 | country | language  │
//! │ (count, offset) for sources, locations, topics,               │
//! │ articles, images                                              │
//! ├───────────────────────────────────────────────────────────────┤
//! │ SOURCE TABLE (1 x 28 B)        │ SOURCE PICTURES (logo)       │
//! ├───────────────────────────────────────────────────────────────┤
//! │ LOCATION TABLE (1 x 16 B)      │ LOCATION TEXT                │
//! ├───────────────────────────────────────────────────────────────┤
//! │ TOPIC TABLE (8 x 12 B, slot 0 all zero)                       │
//! │ TIMESTAMPS (one contiguous run of (time, id) per topic)       │
//! │ TOPIC TEXT (topic names)                                      │
//! ├───────────────────────────────────────────────────────────────┤
//! │ ARTICLE TABLE (N x 44 B)       │ ARTICLE TEXT (headline, body)│
//! ├───────────────────────────────────────────────────────────────┤
//! │ IMAGE TABLE (M x 24 B)                                        │
//! │ IMAGE PICTURES (all pictures)  │ IMAGE CAPTIONS               │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! All integers are little-endian. Text is UTF-16LE followed by a two-byte
//! null terminator; recorded sizes exclude the terminator. Every payload and
//! section boundary is padded to 4 bytes.
//!
//! Layout is computed with [`Assembler`], which hands out each offset before
//! the bytes it points at are appended. Fixed tables are reserved as zeros
//! and patched once their payloads are placed.

mod article;
mod assembler;
mod error;
mod format;
mod image;
mod location;
mod reader;
mod records;
mod source;
mod topic;
mod writer;

pub use assembler::{Assembler, ALIGNMENT};
pub use error::ContainerError;
pub use format::{
    Header, Section, TableRef, ARTICLE_RECORD_BYTES, CRC_START, FORMAT_VERSION, HEADER_BYTES,
    IMAGE_RECORD_BYTES, LOCATION_RECORD_BYTES, NO_PICTURE, SOURCE_RECORD_BYTES,
    TIMESTAMP_ENTRY_BYTES, TOPIC_RECORD_BYTES,
};
pub use reader::ContainerReader;
pub use records::{
    ArticleRecord, ImageRecord, LocationRecord, PictureRef, Record, SourceRecord, Span,
    TimestampEntry, TopicRecord,
};
pub use source::{SOURCE_LOGO_FLAG, SOURCE_POSITION};
pub use writer::{ContainerInput, ContainerWriter};

#[cfg(test)]
mod tests;
