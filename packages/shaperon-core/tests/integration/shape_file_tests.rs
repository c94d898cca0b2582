//! Shape and index files written side by side.

use std::fs;
use std::io::Read;

use ntest::timeout;
use tempfile::tempdir;

use shaperon_core::config::WriterConfig;
use shaperon_core::io::open_buffered;
use shaperon_core::shape::{
    shape_index_from_primary, PointM, ShapeBinaryWriter, ShapeContent, ShapeError,
    ShapeFileAggregate, ShapeFileHeader, ShapeIndexBinaryWriter, ShapeIndexRecord, ShapeType,
};

use super::helpers::{number_records, polyline};

#[timeout(5000)]
#[test]
fn test_index_file_matches_shape_file() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let shape_path = temp_dir.path().join("wegsegment.shp");
    let index_path = temp_dir.path().join("wegsegment.shx");
    let config = WriterConfig::default();

    let records = number_records(
        (0..40)
            .map(|i| {
                if i % 7 == 3 {
                    ShapeContent::Null
                } else {
                    ShapeContent::PolyLineM(polyline(f64::from(i), 1 + i as usize % 4))
                }
            })
            .collect(),
    );
    let aggregate = ShapeFileAggregate::from_records(ShapeType::PolyLineM, &records)?;

    let mut shape_writer = ShapeBinaryWriter::create(&shape_path, aggregate.shape_header(), &config)?;
    shape_writer.write_many(&records)?;
    shape_writer.close()?;

    let mut index_writer =
        ShapeIndexBinaryWriter::create(&index_path, aggregate.index_header()?, &config)?;
    index_writer.write_many(aggregate.index_records())?;
    index_writer.close()?;

    let shape_bytes = fs::read(&shape_path)?;
    let index_bytes = fs::read(&index_path)?;
    assert_eq!(shape_bytes.len() as u64, aggregate.file_length().to_byte_length());
    assert_eq!(index_bytes.len(), 100 + 8 * records.len());

    // Every entry points at the record header with the matching content length
    let mut index_reader = &index_bytes[..];
    let index_header = ShapeFileHeader::read(&mut index_reader)?;
    assert_eq!(index_header.bounding_box, aggregate.bounding_box());
    for record in &records {
        let entry = ShapeIndexRecord::read(&mut index_reader)?;
        let start = entry.offset.to_byte_offset() as usize;
        assert_eq!(
            &shape_bytes[start..start + 4],
            &record.header().record_number.to_i32().to_be_bytes()
        );
        assert_eq!(
            &shape_bytes[start + 4..start + 8],
            &entry.content_length.to_i32().to_be_bytes()
        );
    }
    assert!(index_reader.is_empty());
    Ok(())
}

#[timeout(5000)]
#[test]
fn test_rebuild_index_from_file() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let shape_path = temp_dir.path().join("punt.shp");
    let config = WriterConfig {
        buffer_capacity: 512,
        sync_on_close: false,
    };

    let records = number_records(
        (0..300)
            .map(|i| ShapeContent::Point(PointM::new(f64::from(i), f64::from(i) / 2.0)))
            .collect(),
    );
    let aggregate = ShapeFileAggregate::from_records(ShapeType::Point, &records)?;

    let mut writer = ShapeBinaryWriter::create(&shape_path, aggregate.shape_header(), &config)?;
    for record in &records {
        writer.write(record)?;
    }
    writer.close()?;

    let mut reader = open_buffered(&shape_path, &config)?;
    let (header, entries) = shape_index_from_primary(&mut reader)?;
    assert_eq!(header, aggregate.shape_header());
    assert_eq!(entries, aggregate.index_records());
    assert_eq!(entries.last().map(|entry| entry.offset.to_i32()), Some(50 + 299 * 14));

    let mut rest = Vec::new();
    reader.read_to_end(&mut rest)?;
    assert!(rest.is_empty());
    Ok(())
}

#[timeout(5000)]
#[test]
fn test_dropped_writer_flushes_file() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let index_path = temp_dir.path().join("dropped.shx");
    let header = ShapeFileHeader::new(ShapeFileHeader::LENGTH, ShapeType::Point, Default::default())
        .for_index(1)?;

    {
        let mut writer = ShapeIndexBinaryWriter::create(&index_path, header, &WriterConfig::default())?;
        writer.write(&ShapeIndexRecord {
            offset: ShapeIndexRecord::INITIAL_OFFSET,
            content_length: ShapeContent::Null.content_length()?,
        })?;
    }

    assert_eq!(fs::read(&index_path)?.len(), 108);
    Ok(())
}

#[timeout(5000)]
#[test]
fn test_rebuild_rejects_non_shape_file() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("not-a-shape.shp");
    fs::write(&path, vec![0u8; 100])?;

    let mut reader = open_buffered(&path, &WriterConfig::default())?;
    let error = shape_index_from_primary(&mut reader).unwrap_err();
    assert!(matches!(error, ShapeError::InvalidFileCode { found: 0 }));
    Ok(())
}
