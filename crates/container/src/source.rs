//! Source table: a single record for the one content provider, followed by
//! its logo picture.
//!
//! Name and copyright text are not carried yet; their spans stay zero but
//! the fields remain part of the record layout.

use crate::assembler::Assembler;
use crate::error::ContainerError;
use crate::format::{Section, TableRef};
use crate::records::{Record, SourceRecord};

/// Logo flag written for the provider (0 = picture logo).
pub const SOURCE_LOGO_FLAG: u8 = 0;

/// Display position of the provider in the source list.
pub const SOURCE_POSITION: u8 = 1;

pub(crate) fn build(asm: &mut Assembler, logo: &[u8]) -> Result<TableRef, ContainerError> {
    let table = asm.reserve_fixed_table(Section::SourceTable, 1, SourceRecord::BYTES)?;

    let mut record = SourceRecord {
        logo: SOURCE_LOGO_FLAG,
        position: SOURCE_POSITION,
        ..SourceRecord::default()
    };

    if !logo.is_empty() {
        record.picture = asm.append_blob(Section::SourcePictures, logo)?;
    }

    asm.fill_table(Section::SourceTable, &[record])?;
    Ok(table)
}
