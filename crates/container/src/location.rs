//! Location table: one record for the hardcoded location and its name.

use codec::encode_coordinate;
use news::Location;

use crate::assembler::Assembler;
use crate::error::ContainerError;
use crate::format::{Section, TableRef};
use crate::records::{LocationRecord, Record};

pub(crate) fn build(asm: &mut Assembler, location: &Location) -> Result<TableRef, ContainerError> {
    let table = asm.reserve_fixed_table(Section::LocationTable, 1, LocationRecord::BYTES)?;

    let mut record = LocationRecord {
        text_offset: 0,
        latitude: encode_coordinate(location.latitude),
        longitude: encode_coordinate(location.longitude),
        country_code: location.country_code,
        region_code: location.region_code,
        location_code: location.location_code,
        zoom: location.zoom,
    };

    record.text_offset = asm.append_text(Section::LocationText, location.name)?.offset;

    asm.fill_table(Section::LocationTable, &[record])?;
    Ok(table)
}
