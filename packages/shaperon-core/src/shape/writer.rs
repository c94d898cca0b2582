//! Header-first writers for the primary and index streams.
//!
//! Both writers emit the header on construction and then append records.
//! Closing flushes the sink exactly once and releases it; any later write
//! fails with [`ShapeError::WriterClosed`]. A writer dropped while still open
//! flushes on drop and logs a flush failure instead of panicking.

use std::io::Write;
use std::path::Path;

use super::error::ShapeError;
use super::header::ShapeFileHeader;
use super::record::{ShapeIndexRecord, ShapeRecord};
use crate::config::WriterConfig;
use crate::io::FileSink;

/// Header plus the sink, present until closed.
#[derive(Debug)]
struct HeaderedSink<W: Write> {
    header: ShapeFileHeader,
    sink: Option<W>,
    stream: &'static str,
}

impl<W: Write> HeaderedSink<W> {
    fn open(header: ShapeFileHeader, mut sink: W, stream: &'static str) -> Result<Self, ShapeError> {
        header.write(&mut sink)?;
        tracing::debug!(
            stream,
            shape_type = %header.shape_type,
            file_length = %header.file_length,
            "wrote shape file header"
        );
        Ok(Self {
            header,
            sink: Some(sink),
            stream,
        })
    }

    fn sink(&mut self) -> Result<&mut W, ShapeError> {
        self.sink.as_mut().ok_or(ShapeError::WriterClosed)
    }

    fn get_ref(&self) -> Option<&W> {
        self.sink.as_ref()
    }

    fn close(&mut self) -> Result<(), ShapeError> {
        if let Some(mut sink) = self.sink.take() {
            sink.flush()?;
        }
        Ok(())
    }

    fn into_inner(mut self) -> Result<W, ShapeError> {
        let mut sink = self.sink.take().ok_or(ShapeError::WriterClosed)?;
        sink.flush()?;
        Ok(sink)
    }
}

impl<W: Write> Drop for HeaderedSink<W> {
    fn drop(&mut self) {
        if let Some(mut sink) = self.sink.take() {
            if let Err(error) = sink.flush() {
                tracing::warn!(stream = self.stream, %error, "failed to flush unclosed writer");
            }
        }
    }
}

/// Writes the index stream: the header followed by fixed size entries.
#[derive(Debug)]
pub struct ShapeIndexBinaryWriter<W: Write> {
    inner: HeaderedSink<W>,
}

impl<W: Write> ShapeIndexBinaryWriter<W> {
    /// Writes `header` to `sink` and returns a writer appending entries after it.
    pub fn new(header: ShapeFileHeader, sink: W) -> Result<Self, ShapeError> {
        Ok(Self {
            inner: HeaderedSink::open(header, sink, "index")?,
        })
    }

    pub fn header(&self) -> &ShapeFileHeader {
        &self.inner.header
    }

    /// The sink, or `None` once the writer is closed.
    pub fn get_ref(&self) -> Option<&W> {
        self.inner.get_ref()
    }

    pub fn write(&mut self, record: &ShapeIndexRecord) -> Result<(), ShapeError> {
        let sink = self.inner.sink()?;
        record.write(sink)?;
        tracing::trace!(
            offset = %record.offset,
            content_length = %record.content_length,
            "wrote index entry"
        );
        Ok(())
    }

    /// Writes `records` back to back, in order.
    pub fn write_many(&mut self, records: &[ShapeIndexRecord]) -> Result<(), ShapeError> {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    /// Flushes and releases the sink. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<(), ShapeError> {
        self.inner.close()
    }

    /// Flushes and returns the sink.
    pub fn into_inner(self) -> Result<W, ShapeError> {
        self.inner.into_inner()
    }
}

impl ShapeIndexBinaryWriter<FileSink> {
    /// Creates (or truncates) the index file at `path` and writes `header` to it.
    pub fn create(
        path: impl AsRef<Path>,
        header: ShapeFileHeader,
        config: &WriterConfig,
    ) -> Result<Self, ShapeError> {
        Self::new(header, FileSink::create(path, config)?)
    }
}

/// Writes the primary stream: the header followed by numbered records.
#[derive(Debug)]
pub struct ShapeBinaryWriter<W: Write> {
    inner: HeaderedSink<W>,
}

impl<W: Write> ShapeBinaryWriter<W> {
    pub fn new(header: ShapeFileHeader, sink: W) -> Result<Self, ShapeError> {
        Ok(Self {
            inner: HeaderedSink::open(header, sink, "shape")?,
        })
    }

    pub fn header(&self) -> &ShapeFileHeader {
        &self.inner.header
    }

    pub fn get_ref(&self) -> Option<&W> {
        self.inner.get_ref()
    }

    pub fn write(&mut self, record: &ShapeRecord) -> Result<(), ShapeError> {
        let sink = self.inner.sink()?;
        record.write(sink)?;
        tracing::trace!(
            record_number = %record.header().record_number,
            length = %record.length(),
            "wrote shape record"
        );
        Ok(())
    }

    pub fn write_many(&mut self, records: &[ShapeRecord]) -> Result<(), ShapeError> {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    pub fn close(&mut self) -> Result<(), ShapeError> {
        self.inner.close()
    }

    pub fn into_inner(self) -> Result<W, ShapeError> {
        self.inner.into_inner()
    }
}

impl ShapeBinaryWriter<FileSink> {
    /// Creates (or truncates) the shape file at `path` and writes `header` to it.
    pub fn create(
        path: impl AsRef<Path>,
        header: ShapeFileHeader,
        config: &WriterConfig,
    ) -> Result<Self, ShapeError> {
        Self::new(header, FileSink::create(path, config)?)
    }
}
