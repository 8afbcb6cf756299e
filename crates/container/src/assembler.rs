//! The offset-tracking buffer shared by every table builder.
//!
//! The assembler owns one byte buffer per [`Section`] and a running length
//! that starts after the fixed-size header. Because sections are only ever
//! appended to in canonical order, the running length is at every moment the
//! absolute file offset the next appended byte will occupy. That is what lets
//! a builder record an offset *before* the bytes it points to exist.
//!
//! Fixed tables use reserve-then-patch: [`Assembler::reserve_fixed_table`]
//! commits the whole table footprint as zero bytes, the builder keeps its
//! records as values and patches them while appending payloads, and
//! [`Assembler::fill_table`] finally serializes the records over the reserved
//! zeros. Filling never changes the running length.

use codec::{encode_utf16, padding_for, TERMINATOR_BYTES};
use tracing::debug;

use crate::error::{to_u32, ContainerError};
use crate::format::{Header, Section, TableRef, CRC_START, HEADER_BYTES};
use crate::records::{Record, Span};

/// Alignment every section boundary and variable payload is padded to.
pub const ALIGNMENT: u32 = codec::ALIGNMENT as u32;

#[derive(Debug, Clone, Copy)]
struct Reservation {
    count: u32,
    record_bytes: u32,
}

/// Growing, section-ordered byte image of a container.
#[derive(Debug)]
pub struct Assembler {
    sections: Vec<Vec<u8>>,
    reservations: Vec<Option<Reservation>>,
    length: u32,
    last: Option<Section>,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    /// Creates an empty assembler with the header space already accounted for.
    pub fn new() -> Self {
        Self {
            sections: vec![Vec::new(); Section::COUNT],
            reservations: vec![None; Section::COUNT],
            length: HEADER_BYTES,
            last: None,
        }
    }

    /// Total bytes committed so far, header included.
    #[must_use]
    pub fn current_length(&self) -> u32 {
        self.length
    }

    /// Bytes committed to `section` so far.
    #[must_use]
    pub fn section_len(&self, section: Section) -> usize {
        self.sections[section.index()].len()
    }

    /// Appends `bytes` to `section` and returns the absolute offset of the
    /// first appended byte.
    ///
    /// # Errors
    ///
    /// [`ContainerError::SectionOutOfOrder`] if a later section has already
    /// been written, [`ContainerError::FieldOverflow`] if the file would grow
    /// past `u32::MAX` bytes.
    pub fn append_bytes(&mut self, section: Section, bytes: &[u8]) -> Result<u32, ContainerError> {
        self.enter(section)?;

        let offset = self.length;
        let end = u64::from(offset) + bytes.len() as u64;
        let end = u32::try_from(end).map_err(|_| ContainerError::FieldOverflow {
            field: "container length",
            value: end,
        })?;

        self.sections[section.index()].extend_from_slice(bytes);
        self.length = end;
        Ok(offset)
    }

    /// Appends zero bytes to `section` until the running length is a multiple
    /// of `alignment`.
    pub fn pad_to_alignment(&mut self, section: Section, alignment: u32) -> Result<(), ContainerError> {
        if alignment <= 1 {
            return Ok(());
        }
        let pad = (alignment - self.length % alignment) % alignment;
        self.append_bytes(section, &vec![0u8; pad as usize])?;
        Ok(())
    }

    /// Commits `count * record_bytes` zero bytes for a fixed table and returns
    /// where it starts.
    ///
    /// The footprint is checked against the 32-bit file length before any
    /// zeros are allocated.
    pub fn reserve_fixed_table(
        &mut self,
        section: Section,
        count: usize,
        record_bytes: u32,
    ) -> Result<TableRef, ContainerError> {
        if self.reservations[section.index()].is_some() {
            return Err(ContainerError::AlreadyReserved(section));
        }

        let count = to_u32("record count", count)?;
        let total = u64::from(count) * u64::from(record_bytes);
        let end = u64::from(self.length) + total;
        if end > u64::from(u32::MAX) {
            return Err(ContainerError::FieldOverflow {
                field: "container length",
                value: end,
            });
        }
        let total = usize::try_from(total).map_err(|_| ContainerError::FieldOverflow {
            field: "table size",
            value: total,
        })?;

        let offset = self.append_bytes(section, &vec![0u8; total])?;
        self.reservations[section.index()] = Some(Reservation {
            count,
            record_bytes,
        });

        debug!(?section, count, offset, "reserved table");
        Ok(TableRef { count, offset })
    }

    /// Serializes `records` over the space reserved for `section`.
    pub fn fill_table<R: Record>(&mut self, section: Section, records: &[R]) -> Result<(), ContainerError> {
        let reservation = self.reservations[section.index()]
            .ok_or(ContainerError::NotReserved(section))?;

        if records.len() != reservation.count as usize || R::BYTES != reservation.record_bytes {
            return Err(ContainerError::TableSizeMismatch {
                section,
                reserved: reservation.count,
                actual: records.len(),
            });
        }

        let mut buf = Vec::with_capacity(records.len() * R::BYTES as usize);
        for record in records {
            record.write_to(&mut buf)?;
        }

        let target = &mut self.sections[section.index()];
        if buf.len() != target.len() {
            return Err(ContainerError::TableSizeMismatch {
                section,
                reserved: reservation.count,
                actual: records.len(),
            });
        }
        target.copy_from_slice(&buf);
        Ok(())
    }

    /// Appends `text` as UTF-16LE followed by a null terminator and padding.
    ///
    /// The returned size excludes the terminator.
    pub fn append_text(&mut self, section: Section, text: &str) -> Result<Span, ContainerError> {
        let encoded = encode_utf16(text);
        let size = to_u32("text size", encoded.len())?;
        let offset = self.append_bytes(section, &encoded)?;
        self.append_bytes(section, &[0u8; TERMINATOR_BYTES])?;
        self.pad(section)?;
        Ok(Span { size, offset })
    }

    /// Appends raw bytes followed by padding (no terminator).
    pub fn append_blob(&mut self, section: Section, bytes: &[u8]) -> Result<Span, ContainerError> {
        let size = to_u32("blob size", bytes.len())?;
        let offset = self.append_bytes(section, bytes)?;
        self.pad(section)?;
        Ok(Span { size, offset })
    }

    /// Concatenates the header and every section in canonical order.
    ///
    /// Sets `filesize` and `crc32` on `header` before encoding it; all other
    /// header fields are taken as given.
    pub fn finish(self, mut header: Header) -> Result<Vec<u8>, ContainerError> {
        if padding_for(self.length as usize) != 0 {
            return Err(ContainerError::Corrupt(format!(
                "container length {} is not {}-byte aligned",
                self.length, ALIGNMENT
            )));
        }

        header.filesize = self.length;
        header.crc32 = 0;

        let mut out = Vec::with_capacity(self.length as usize);
        header.write_to(&mut out)?;
        for section in Section::ALL {
            out.extend_from_slice(&self.sections[section.index()]);
        }

        let crc = crc32fast::hash(&out[CRC_START..]);
        out[CRC_START - 4..CRC_START].copy_from_slice(&crc.to_le_bytes());

        debug!(bytes = out.len(), crc, "finished container");
        Ok(out)
    }

    fn pad(&mut self, section: Section) -> Result<(), ContainerError> {
        let pad = padding_for(self.length as usize);
        self.append_bytes(section, &vec![0u8; pad])?;
        Ok(())
    }

    fn enter(&mut self, section: Section) -> Result<(), ContainerError> {
        if let Some(last) = self.last {
            if section < last {
                return Err(ContainerError::SectionOutOfOrder { section, after: last });
            }
        }
        self.last = Some(section);
        Ok(())
    }
}
