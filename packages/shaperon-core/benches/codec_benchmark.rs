//! Benchmarks for the numeric field codecs, bounding box folding and the
//! index writer.

use std::hint::black_box;
use std::io::Cursor;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::Decimal;
use shaperon_core::dbase::{DbaseDecimal, DbaseDouble, DbaseField, DbaseFieldName, DbaseInt32};
use shaperon_core::shape::{
    BoundingBox3D, LineString, MultiLineString, PointM, RecordNumber, ShapeContent,
    ShapeFileAggregate, ShapeIndexBinaryWriter, ShapeRecord, ShapeType,
};

fn number_field(length: u8, decimal_count: u8) -> DbaseField {
    DbaseField::create_number_field(DbaseFieldName::new("value").unwrap(), length, decimal_count)
        .unwrap()
}

/// Benchmark: assign, write and read back numeric values
fn benchmark_numeric_codecs(c: &mut Criterion) {
    let mut group = c.benchmark_group("numeric_codecs");

    let mut int32 = DbaseInt32::new(number_field(10, 0)).unwrap();
    group.bench_function("int32_write_read", |b| {
        let mut buffer = Vec::with_capacity(10);
        b.iter(|| {
            buffer.clear();
            int32.set_value(Some(black_box(-123_456))).unwrap();
            int32.write(&mut buffer).unwrap();
            int32.read(&mut Cursor::new(&buffer)).unwrap();
        })
    });

    let mut double = DbaseDouble::new(number_field(18, 6)).unwrap();
    group.bench_function("double_write_read", |b| {
        let mut buffer = Vec::with_capacity(18);
        b.iter(|| {
            buffer.clear();
            double.set_value(Some(black_box(51_234.567_891_2))).unwrap();
            double.write(&mut buffer).unwrap();
            double.read(&mut Cursor::new(&buffer)).unwrap();
        })
    });

    let mut decimal = DbaseDecimal::new(number_field(18, 4)).unwrap();
    let value = Decimal::new(-98_765_432_109, 5);
    group.bench_function("decimal_write_read", |b| {
        let mut buffer = Vec::with_capacity(18);
        b.iter(|| {
            buffer.clear();
            decimal.set_value(Some(black_box(value))).unwrap();
            decimal.write(&mut buffer).unwrap();
            decimal.read(&mut Cursor::new(&buffer)).unwrap();
        })
    });

    group.bench_function("double_accepts_value", |b| {
        b.iter(|| double.accepts_value(Some(black_box(1.0e12))))
    });

    group.finish();
}

fn polyline_records(count: usize) -> Vec<ShapeRecord> {
    let mut number = RecordNumber::INITIAL;
    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let base = i as f64;
        let line = LineString::new(
            (0..8)
                .map(|j| PointM::new(base + j as f64, base - j as f64).with_m(j as f64))
                .collect(),
        );
        let content = ShapeContent::PolyLineM(MultiLineString::new(vec![line]));
        records.push(content.record_as(number).unwrap());
        number = number.next().unwrap();
    }
    records
}

/// Benchmark: fold records into offsets and extents, then write the index
fn benchmark_index_writer(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_writer");

    for count in [100, 10_000] {
        let records = polyline_records(count);

        group.bench_with_input(BenchmarkId::new("aggregate", count), &records, |b, records| {
            b.iter(|| ShapeFileAggregate::from_records(ShapeType::PolyLineM, records).unwrap())
        });

        let aggregate = ShapeFileAggregate::from_records(ShapeType::PolyLineM, &records).unwrap();
        group.bench_with_input(BenchmarkId::new("write_many", count), &aggregate, |b, aggregate| {
            b.iter(|| {
                let mut writer = ShapeIndexBinaryWriter::new(
                    aggregate.index_header().unwrap(),
                    Vec::with_capacity(100 + 8 * count),
                )
                .unwrap();
                writer.write_many(aggregate.index_records()).unwrap();
                writer.into_inner().unwrap()
            })
        });

        let boxes: Vec<BoundingBox3D> = records
            .iter()
            .map(|record| record.content().bounding_box())
            .collect();
        group.bench_with_input(BenchmarkId::new("fold_boxes", count), &boxes, |b, boxes| {
            b.iter(|| BoundingBox3D::from_boxes(boxes.iter().copied()))
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("fold_boxes_par", count), &boxes, |b, boxes| {
            b.iter(|| BoundingBox3D::from_boxes_par(boxes))
        });
    }

    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .sample_size(50)
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(3));
    targets =
        benchmark_numeric_codecs,
        benchmark_index_writer
);
criterion_main!(benches);
