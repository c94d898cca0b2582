//! Features with attributes and geometry written as a matching table, shape
//! file and index.

use std::io::{BufReader, Cursor};

use ntest::timeout;
use rust_decimal::Decimal;
use tempfile::tempdir;

use shaperon_core::config::WriterConfig;
use shaperon_core::dbase::{DbaseFieldValue, DbaseRecord};
use shaperon_core::io::FileSink;
use shaperon_core::shape::{
    shape_index_from_primary, BoundingBox3D, ShapeBinaryWriter, ShapeContent, ShapeFileAggregate,
    ShapeFileHeader, ShapeIndexBinaryWriter, ShapeRecord, ShapeType,
};

use super::helpers::{
    number_records, polyline, read_descriptors, read_records, road_fields, write_descriptors,
};

struct Feature {
    id: i32,
    length: Decimal,
    geometry: ShapeContent,
}

fn features() -> Vec<Feature> {
    (1..=12)
        .map(|id| Feature {
            id,
            length: Decimal::new(i64::from(id) * 1_250, 2),
            geometry: if id == 5 {
                ShapeContent::Null
            } else {
                ShapeContent::PolyLineM(polyline(f64::from(id) * 100.0, 2))
            },
        })
        .collect()
}

#[timeout(5000)]
#[test]
fn test_features_to_table_shape_and_index() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let config = WriterConfig::default();
    let features = features();
    let fields = road_fields();

    // Attribute table
    let mut table = Vec::new();
    write_descriptors(&mut table, &fields)?;
    for feature in &features {
        let mut record = DbaseRecord::new(&fields)?;
        for value in record.values_mut() {
            match value {
                DbaseFieldValue::Int32(id) => id.set_value(Some(feature.id))?,
                DbaseFieldValue::Decimal(length) => length.set_value(Some(feature.length))?,
                _ => {}
            }
        }
        record.write(&mut table)?;
    }

    // Geometry and index
    let records: Vec<ShapeRecord> =
        number_records(features.iter().map(|feature| feature.geometry.clone()).collect());
    let aggregate = ShapeFileAggregate::from_records(ShapeType::PolyLineM, &records)?;
    let expected_box = BoundingBox3D::from_boxes(
        features.iter().map(|feature| feature.geometry.bounding_box()),
    );
    assert_eq!(aggregate.bounding_box(), expected_box);
    assert_eq!(expected_box.x_min, 100.0);
    assert_eq!(expected_box.m_max, 4.0);
    assert!(expected_box.z_min.is_nan());

    let shape_path = temp_dir.path().join("wegsegment.shp");
    let mut shape_writer = ShapeBinaryWriter::new(
        aggregate.shape_header(),
        FileSink::create(&shape_path, &config)?,
    )?;
    shape_writer.write_many(&records)?;
    shape_writer.close()?;

    let mut index = Vec::new();
    {
        let mut index_writer = ShapeIndexBinaryWriter::new(aggregate.index_header()?, &mut index)?;
        index_writer.write_many(aggregate.index_records())?;
        index_writer.close()?;
    }

    // Read everything back
    let mut table_reader = Cursor::new(table);
    let read_fields = read_descriptors(&mut table_reader)?;
    let rows = read_records(&mut table_reader, &read_fields)?;
    assert_eq!(rows.len(), features.len());

    let mut shape_reader = BufReader::new(std::fs::File::open(&shape_path)?);
    let (_, rebuilt) = shape_index_from_primary(&mut shape_reader)?;
    assert_eq!(rebuilt, aggregate.index_records());

    let mut index_reader = &index[..];
    let index_header = ShapeFileHeader::read(&mut index_reader)?;
    assert_eq!(index_header.file_length.to_byte_length(), index.len() as u64);

    // Row i describes record number i + 1
    for (row, record) in rows.iter().zip(&records) {
        let DbaseFieldValue::Int32(id) = &row.values()[0] else {
            panic!("expected an integer identifier");
        };
        assert_eq!(id.require_value()?, record.header().record_number.to_i32());
        let DbaseFieldValue::Decimal(length) = &row.values()[2] else {
            panic!("expected a decimal length");
        };
        assert_eq!(
            length.require_value()?,
            Decimal::new(i64::from(id.require_value()?) * 1_250, 2)
        );
    }
    Ok(())
}
