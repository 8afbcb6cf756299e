//! Topic table, the shared timestamp segment, and topic names.
//!
//! The table has one record per topic plus the reserved, all-zero slot 0.
//! All timestamp runs are written first, one contiguous run per topic in
//! slot order, and only then the topic names. The timestamp segment
//! therefore starts right after the topic table.

use news::Topic;
use tracing::debug;

use crate::assembler::Assembler;
use crate::error::{to_u32, ContainerError};
use crate::format::{Section, TableRef};
use crate::records::{Record, TimestampEntry, TopicRecord};

/// `timestamps` is indexed by topic slot and must have [`Topic::SLOTS`] runs.
pub(crate) fn build(
    asm: &mut Assembler,
    timestamps: &[Vec<TimestampEntry>],
) -> Result<TableRef, ContainerError> {
    if timestamps.len() != Topic::SLOTS {
        return Err(ContainerError::TopicSlots {
            expected: Topic::SLOTS,
            actual: timestamps.len(),
        });
    }
    if !timestamps[0].is_empty() {
        return Err(ContainerError::ReservedTopicInUse);
    }

    let table = asm.reserve_fixed_table(Section::TopicTable, Topic::SLOTS, TopicRecord::BYTES)?;
    let mut records = vec![TopicRecord::default(); Topic::SLOTS];

    let mut buf = Vec::new();
    for topic in Topic::ALL {
        let slot = topic.slot();
        let run = &timestamps[slot];

        buf.clear();
        for entry in run {
            entry.write_to(&mut buf)?;
        }

        records[slot].article_count = to_u32("topic article count", run.len())?;
        records[slot].timestamp_offset = asm.append_bytes(Section::Timestamps, &buf)?;
        debug!(
            %topic,
            count = run.len(),
            offset = records[slot].timestamp_offset,
            "wrote timestamp run"
        );
    }

    for topic in Topic::ALL {
        records[topic.slot()].text_offset = asm.append_text(Section::TopicText, topic.name())?.offset;
    }

    asm.fill_table(Section::TopicTable, &records)?;
    Ok(table)
}
