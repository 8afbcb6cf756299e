use std::io;
use thiserror::Error;

use crate::format::Section;

/// Errors raised while laying out, publishing or reading back a container.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// A size, count or offset does not fit its 32-bit field.
    #[error("{field} value {value} does not fit in a 32-bit field")]
    FieldOverflow { field: &'static str, value: u64 },

    /// Bytes were appended to a section that precedes one already written.
    #[error("section {section:?} written after {after:?}")]
    SectionOutOfOrder { section: Section, after: Section },

    /// A fixed table was reserved twice.
    #[error("table {0:?} already reserved")]
    AlreadyReserved(Section),

    /// A fixed table was filled without being reserved first.
    #[error("table {0:?} was never reserved")]
    NotReserved(Section),

    /// The records handed to `fill_table` do not match the reservation.
    #[error("table {section:?} reserved for {reserved} records, got {actual}")]
    TableSizeMismatch {
        section: Section,
        reserved: u32,
        actual: usize,
    },

    /// The timestamp runs do not cover exactly one entry per topic slot.
    #[error("expected {expected} topic slots, got {actual}")]
    TopicSlots { expected: usize, actual: usize },

    /// Something was accumulated into reserved topic slot 0.
    #[error("topic slot 0 is reserved and must stay empty")]
    ReservedTopicInUse,

    /// A container being read back is inconsistent.
    #[error("corrupt container: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Codec(#[from] codec::CodecError),
}

/// Converts a length or count into a 32-bit field value.
pub(crate) fn to_u32(field: &'static str, value: usize) -> Result<u32, ContainerError> {
    u32::try_from(value).map_err(|_| ContainerError::FieldOverflow {
        field,
        value: value as u64,
    })
}
