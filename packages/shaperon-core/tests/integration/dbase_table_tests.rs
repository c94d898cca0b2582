//! Attribute tables written to and read back from files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Cursor, Write};

use chrono::NaiveDate;
use ntest::timeout;
use rust_decimal::Decimal;
use tempfile::tempdir;

use shaperon_core::dbase::{
    DbaseError, DbaseFieldValue, DbaseRecord, DbaseSingle, FIELD_DESCRIPTOR_SIZE,
};

use super::helpers::{read_descriptors, read_records, road_fields, write_descriptors};

fn road_record(index: i32) -> DbaseRecord {
    let mut record = DbaseRecord::new(&road_fields()).unwrap();
    for value in record.values_mut() {
        match value {
            DbaseFieldValue::Int32(id) => id.set_value(Some(1000 + index)).unwrap(),
            DbaseFieldValue::Character(label) => label
                .set_value(Some(format!("Kerkstraat {index}")))
                .unwrap(),
            DbaseFieldValue::Decimal(length) => length
                .set_value(Some(Decimal::new(i64::from(index) * 12_345, 3)))
                .unwrap(),
            DbaseFieldValue::Single(width) if index % 2 == 0 => {
                width.set_value(Some(3.5 + index as f32)).unwrap()
            }
            DbaseFieldValue::Date(since) => since
                .set_value(NaiveDate::from_ymd_opt(2000 + index, 1, 1))
                .unwrap(),
            DbaseFieldValue::Logical(paved) => paved.set_value(Some(index % 3 != 0)),
            _ => {}
        }
    }
    record
}

#[timeout(5000)]
#[test]
fn test_table_round_trip_through_file() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("wegsegment.dbf");
    let fields = road_fields();
    let records: Vec<DbaseRecord> = (0..50).map(road_record).collect();

    {
        let mut writer = BufWriter::new(File::create(&path)?);
        write_descriptors(&mut writer, &fields)?;
        for record in &records {
            record.write(&mut writer)?;
        }
        writer.flush()?;
    }

    let record_length = records[0].length();
    assert_eq!(record_length, 1 + 10 + 30 + 18 + 8 + 8 + 1);
    assert_eq!(
        fs::metadata(&path)?.len() as usize,
        fields.len() * FIELD_DESCRIPTOR_SIZE + 1 + records.len() * record_length
    );

    let mut reader = BufReader::new(File::open(&path)?);
    let read_fields = read_descriptors(&mut reader)?;
    assert_eq!(read_fields, fields);

    let read = read_records(&mut reader, &read_fields)?;
    assert_eq!(read, records);
    assert!(read[1].values()[3].is_null());
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_null_record_is_all_blanks() {
    let fields = road_fields();
    let record = DbaseRecord::new(&fields).unwrap();

    let mut buffer = Vec::new();
    record.write(&mut buffer).unwrap();
    assert_eq!(buffer.len(), record.length());
    assert!(buffer.iter().all(|&b| b == b' '));

    let mut read = read_records(&mut Cursor::new(buffer), &fields).unwrap();
    assert_eq!(read.len(), 1);
    assert!(read.remove(0).values().iter().all(DbaseFieldValue::is_null));
}

#[timeout(1000)]
#[test]
fn test_corrupt_cells_read_as_null() {
    let fields = road_fields();
    let mut buffer = Vec::new();
    road_record(4).write(&mut buffer).unwrap();

    // Overwrite the length cell with text and the width cell with NUL bytes
    let length_start = 1 + 10 + 30;
    buffer[length_start..length_start + 18].copy_from_slice(b"   twelve metres  ");
    let width_start = length_start + 18;
    buffer[width_start..width_start + 8].fill(0);

    let read = read_records(&mut Cursor::new(buffer), &fields).unwrap();
    let values = read[0].values();
    assert!(values[2].is_null());
    assert!(values[3].is_null());
    assert!(!values[0].is_null());
    assert!(!values[5].is_null());
}

#[timeout(1000)]
#[test]
fn test_truncated_table_names_field() {
    let fields = road_fields();
    let mut buffer = Vec::new();
    road_record(1).write(&mut buffer).unwrap();
    buffer.truncate(1 + 10 + 5);

    let error = read_records(&mut Cursor::new(buffer), &fields).unwrap_err();
    match error {
        DbaseError::TruncatedStream {
            field,
            expected,
            available,
        } => {
            assert_eq!(field, "LBLSTRNM");
            assert_eq!(expected, 30);
            assert_eq!(available, 5);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[timeout(1000)]
#[test]
fn test_precheck_batch_before_writing() {
    let fields = road_fields();
    let width = DbaseSingle::new(fields[3].clone()).unwrap();
    let candidates = [1.25f32, 123456.78, 12345.678, -9999.99, f32::NAN];

    let accepted: Vec<bool> = candidates
        .iter()
        .map(|&candidate| width.accepts_value(Some(candidate)))
        .collect();
    assert_eq!(accepted, vec![true, false, true, true, false]);

    let precision_loss = DbaseSingle::with_value(fields[3].clone(), Some(123456.78)).unwrap_err();
    assert!(matches!(precision_loss, DbaseError::PrecisionLoss { .. }));
    assert!(precision_loss.to_string().contains("BREEDTE"));
}
