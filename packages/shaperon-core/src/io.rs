//! File-backed byte sources and sinks.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use crate::config::WriterConfig;

/// Buffered file sink that optionally syncs the file when flushed.
///
/// Writers flush their sink exactly once when closed, so syncing on flush
/// amounts to syncing on close.
#[derive(Debug)]
pub struct FileSink {
    writer: BufWriter<File>,
    sync_on_flush: bool,
}

impl FileSink {
    /// Creates (or truncates) the file at `path`.
    pub fn create(path: impl AsRef<Path>, config: &WriterConfig) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::with_capacity(config.buffer_capacity, file),
            sync_on_flush: config.sync_on_close,
        })
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        if self.sync_on_flush {
            self.writer.get_ref().sync_all()?;
        }
        Ok(())
    }
}

/// Opens `path` for buffered reading.
pub fn open_buffered(path: impl AsRef<Path>, config: &WriterConfig) -> io::Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::with_capacity(config.buffer_capacity, file))
}
