use super::{build_sample, read_u32};
use crate::*;
use anyhow::Result;
use tempfile::tempdir;

fn reseal(bytes: &mut [u8]) {
    let crc = crc32fast::hash(&bytes[CRC_START..]);
    bytes[8..12].copy_from_slice(&crc.to_le_bytes());
}

#[test]
fn open_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = ContainerReader::open(dir.path().join("news.bin.00")).unwrap_err();
    assert!(matches!(err, ContainerError::Io(_)));
}

#[test]
fn short_buffer_is_corrupt() {
    let err = ContainerReader::from_bytes(vec![0u8; 10]).unwrap_err();
    assert!(matches!(err, ContainerError::Corrupt(_)));
}

#[test]
fn truncated_file_is_corrupt() {
    let mut bytes = build_sample();
    bytes.truncate(bytes.len() - 4);
    let err = ContainerReader::from_bytes(bytes).unwrap_err();
    assert!(err.to_string().contains("filesize"));
}

#[test]
fn flipped_byte_fails_crc() {
    let mut bytes = build_sample();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    let err = ContainerReader::from_bytes(bytes).unwrap_err();
    assert!(err.to_string().contains("crc mismatch"));
}

#[test]
fn picture_index_out_of_range_is_corrupt() {
    let mut bytes = build_sample();
    let articles = read_u32(&bytes, 0x34) as usize;
    let index_at = articles + 16;
    bytes[index_at..index_at + 4].copy_from_slice(&7u32.to_le_bytes());
    reseal(&mut bytes);

    let err = ContainerReader::from_bytes(bytes).unwrap_err();
    assert!(err.to_string().contains("points at image 7"));
}

#[test]
fn table_past_end_is_corrupt() {
    let mut bytes = build_sample();
    // Claim a huge image table.
    bytes[0x38..0x3C].copy_from_slice(&1000u32.to_le_bytes());
    reseal(&mut bytes);

    let err = ContainerReader::from_bytes(bytes).unwrap_err();
    assert!(err.to_string().contains("runs past end"));
}

#[test]
fn text_requires_terminator() -> Result<()> {
    let reader = ContainerReader::from_bytes(build_sample())?;
    let headline = reader.articles[0].headline;

    // Cut the span one code unit short so the next unit is not a null.
    let short = Span {
        size: headline.size - 2,
        offset: headline.offset,
    };
    assert!(reader.text(short).is_err());
    Ok(())
}

#[test]
fn slice_out_of_bounds_is_corrupt() -> Result<()> {
    let reader = ContainerReader::from_bytes(build_sample())?;
    let span = Span {
        size: 16,
        offset: reader.header.filesize - 4,
    };
    assert!(matches!(reader.slice(span), Err(ContainerError::Corrupt(_))));
    Ok(())
}

#[test]
fn topic_entries_rejects_unknown_slot() -> Result<()> {
    let reader = ContainerReader::from_bytes(build_sample())?;
    assert!(reader.topic_entries(8).is_err());
    assert!(reader.topic_entries(0)?.is_empty());
    Ok(())
}
