//! Shared fixtures for the integration suite.

use std::io::{BufRead, Write};

use shaperon_core::dbase::{
    DbaseError, DbaseField, DbaseFieldName, DbaseRecord, FIELD_DESCRIPTOR_TERMINATOR,
};
use shaperon_core::shape::{
    LineString, MultiLineString, PointM, RecordNumber, ShapeContent, ShapeRecord,
};

pub fn field_name(name: &str) -> DbaseFieldName {
    DbaseFieldName::new(name).unwrap()
}

/// Fields of a small road segment table, laid out one after the other.
pub fn road_fields() -> Vec<DbaseField> {
    let id = DbaseField::create_number_field(field_name("WS_OIDN"), 10, 0).unwrap();
    let label = DbaseField::create_character_field(field_name("LBLSTRNM"), 30)
        .unwrap()
        .after(&id);
    let length = DbaseField::create_number_field(field_name("LENGTE"), 18, 3)
        .unwrap()
        .after(&label);
    let width = DbaseField::create_float_field(field_name("BREEDTE"), 8, 2)
        .unwrap()
        .after(&length);
    let since = DbaseField::create_date_field(field_name("BEGINTIJD"))
        .unwrap()
        .after(&width);
    let paved = DbaseField::create_logical_field(field_name("VERHARD"))
        .unwrap()
        .after(&since);
    vec![id, label, length, width, since, paved]
}

/// Writes the descriptors followed by the terminator byte.
pub fn write_descriptors<W: Write>(writer: &mut W, fields: &[DbaseField]) -> Result<(), DbaseError> {
    for field in fields {
        field.write(writer)?;
    }
    writer.write_all(&[FIELD_DESCRIPTOR_TERMINATOR])?;
    Ok(())
}

/// Reads descriptors up to and including the terminator byte.
pub fn read_descriptors<R: BufRead>(reader: &mut R) -> Result<Vec<DbaseField>, DbaseError> {
    let mut fields = Vec::new();
    loop {
        let next = reader.fill_buf()?.first().copied();
        match next {
            Some(FIELD_DESCRIPTOR_TERMINATOR) => {
                reader.consume(1);
                return Ok(fields);
            }
            Some(_) => fields.push(DbaseField::read(reader)?),
            None => return Ok(fields),
        }
    }
}

/// Reads records until the stream is exhausted.
pub fn read_records<R: BufRead>(
    reader: &mut R,
    fields: &[DbaseField],
) -> Result<Vec<DbaseRecord>, DbaseError> {
    let mut records = Vec::new();
    while !reader.fill_buf()?.is_empty() {
        let mut record = DbaseRecord::new(fields)?;
        record.read(reader)?;
        records.push(record);
    }
    Ok(records)
}

/// A polyline with `parts` parts of three measured points, offset by `seed`.
pub fn polyline(seed: f64, parts: usize) -> MultiLineString {
    let lines = (0..parts)
        .map(|part| {
            let base = seed + part as f64 * 10.0;
            LineString::new(vec![
                PointM::new(base, seed).with_m(0.0),
                PointM::new(base + 1.0, seed + 2.0).with_m(1.5),
                PointM::new(base + 3.0, seed - 1.0).with_m(4.0),
            ])
        })
        .collect();
    MultiLineString::new(lines)
}

/// Numbers `contents` as consecutive records starting at 1.
pub fn number_records(contents: Vec<ShapeContent>) -> Vec<ShapeRecord> {
    let mut number = RecordNumber::INITIAL;
    let mut records = Vec::with_capacity(contents.len());
    for content in contents {
        records.push(content.record_as(number).unwrap());
        number = number.next().unwrap();
    }
    records
}
