//! CLI tool for shape index files.
//!
//! Provides commands for:
//! - Inspecting the header and entries of an index file
//! - Rebuilding an index file from its shape file

mod cli;

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use shaperon_core::config::WriterConfig;
use shaperon_core::io::open_buffered;
use shaperon_core::shape::{
    shape_index_from_primary, ShapeFileHeader, ShapeIndexBinaryWriter, ShapeIndexRecord,
};

use cli::{Cli, Commands};

#[derive(Serialize)]
struct IndexReport {
    header: ShapeFileHeader,
    entries: Vec<ShapeIndexRecord>,
}

fn read_index(path: &Path, config: &WriterConfig) -> Result<IndexReport> {
    let mut reader = open_buffered(path, config)
        .with_context(|| format!("failed to open index file {}", path.display()))?;
    let header = ShapeFileHeader::read(&mut reader)
        .with_context(|| format!("failed to read the header of {}", path.display()))?;

    let mut entries = Vec::new();
    while !reader.fill_buf()?.is_empty() {
        let entry = ShapeIndexRecord::read(&mut reader)
            .with_context(|| format!("failed to read index entry {}", entries.len() + 1))?;
        entries.push(entry);
    }

    let expected = ShapeFileHeader::LENGTH.to_byte_length()
        + ShapeIndexRecord::LENGTH.to_byte_length() * entries.len() as u64;
    if header.file_length.to_byte_length() != expected {
        tracing::warn!(
            declared = header.file_length.to_byte_length(),
            actual = expected,
            "index header length does not match its entries"
        );
    }

    Ok(IndexReport { header, entries })
}

fn inspect_index(path: &Path, json: bool, config: &WriterConfig) -> Result<()> {
    let report = read_index(path, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let header = &report.header;
    let bounding_box = &header.bounding_box;
    println!("Shape type:  {}", header.shape_type);
    println!("File length: {} words", header.file_length);
    println!(
        "Extent:      X [{}, {}] Y [{}, {}] Z [{}, {}] M [{}, {}]",
        bounding_box.x_min,
        bounding_box.x_max,
        bounding_box.y_min,
        bounding_box.y_max,
        bounding_box.z_min,
        bounding_box.z_max,
        bounding_box.m_min,
        bounding_box.m_max
    );
    println!("Entries:     {}", report.entries.len());
    println!();
    println!("{:>8} {:>12} {:>12}", "record", "offset", "length");
    for (index, entry) in report.entries.iter().enumerate() {
        println!(
            "{:>8} {:>12} {:>12}",
            index + 1,
            entry.offset,
            entry.content_length
        );
    }
    Ok(())
}

fn rebuild_index(shape: &Path, index: &Path, config: &WriterConfig) -> Result<()> {
    let mut reader = open_buffered(shape, config)
        .with_context(|| format!("failed to open shape file {}", shape.display()))?;
    let (header, entries) = shape_index_from_primary(&mut reader)
        .with_context(|| format!("failed to scan the records of {}", shape.display()))?;

    let mut writer = ShapeIndexBinaryWriter::create(index, header.for_index(entries.len())?, config)
        .with_context(|| format!("failed to create index file {}", index.display()))?;
    writer.write_many(&entries)?;
    writer.close()?;

    tracing::info!(
        records = entries.len(),
        index = %index.display(),
        "rebuilt shape index"
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    let mut config = WriterConfig {
        buffer_capacity: cli.buffer_capacity,
        ..Default::default()
    };

    match cli.command {
        Commands::InspectIndex { path, json } => inspect_index(&path, json, &config),
        Commands::RebuildIndex {
            shape,
            index,
            no_sync,
        } => {
            config.sync_on_close = !no_sync;
            rebuild_index(&shape, &index, &config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shaperon_core::shape::{
        PointM, RecordNumber, ShapeBinaryWriter, ShapeContent, ShapeFileAggregate, ShapeType,
    };

    #[test]
    fn test_rebuilt_index_reads_back() {
        let temp_dir = tempfile::tempdir().unwrap();
        let shape = temp_dir.path().join("punt.shp");
        let index = temp_dir.path().join("punt.shx");
        let config = WriterConfig::default();

        let mut number = RecordNumber::INITIAL;
        let mut records = Vec::new();
        for i in 0..5 {
            let content = ShapeContent::Point(PointM::new(f64::from(i), 0.0));
            records.push(content.record_as(number).unwrap());
            number = number.next().unwrap();
        }
        let aggregate = ShapeFileAggregate::from_records(ShapeType::Point, &records).unwrap();
        let mut writer = ShapeBinaryWriter::create(&shape, aggregate.shape_header(), &config).unwrap();
        writer.write_many(&records).unwrap();
        writer.close().unwrap();

        rebuild_index(&shape, &index, &config).unwrap();

        let report = read_index(&index, &config).unwrap();
        assert_eq!(report.header, aggregate.index_header().unwrap());
        assert_eq!(report.entries, aggregate.index_records());
        assert!(serde_json::to_string(&report).is_ok());
    }
}
