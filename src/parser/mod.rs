//! Handles all the FASTQ parsing
use std::fs::File;
use std::io;
#[cfg(feature = "compression")]
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

#[cfg(feature = "compression")]
use bzip2::read::BzDecoder;
#[cfg(feature = "compression")]
use flate2::read::MultiGzDecoder;
use log::debug;
#[cfg(feature = "compression")]
use xz2::read::XzDecoder;

use crate::errors::ParseError;
pub use crate::parser::fastq::Reader as FastqReader;

mod closable;
mod fastq;
mod record;
mod utils;

pub use closable::{ClosableReader, ClosableStream, CloseHandle};
pub use record::FastqRecord;
pub use utils::{LineEnding, Position, ReaderOptions, RecordStream};

// Full signature of each compression format. Two bytes alone can start a
// plain header line, e.g. `BZ...`.
#[cfg(feature = "compression")]
const GZ_MAGIC: &[u8] = &[0x1F, 0x8B, 0x08];
#[cfg(feature = "compression")]
const BZ_MAGIC: &[u8] = b"BZh";
#[cfg(feature = "compression")]
const XZ_MAGIC: &[u8] = &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];
#[cfg(feature = "compression")]
const MAGIC_LEN: u64 = 6;

/// Reads up to the first `MAGIC_LEN` bytes and hands back a reader that still
/// starts at the first byte.
#[cfg(feature = "compression")]
fn peek_magic<R: Read>(mut reader: R) -> io::Result<(Vec<u8>, io::Chain<Cursor<Vec<u8>>, R>)> {
    let mut first = Vec::with_capacity(MAGIC_LEN as usize);
    (&mut reader).take(MAGIC_LEN).read_to_end(&mut first)?;
    Ok((first.clone(), Cursor::new(first).chain(reader)))
}

fn open_file(path: &Path) -> Result<File, ParseError> {
    let f = File::open(path).map_err(|e| ParseError::new_source_not_found(path, &e))?;
    let is_dir = f
        .metadata()
        .map_err(|e| ParseError::new_source_not_found(path, &e))?
        .is_dir();
    if is_dir {
        let e = io::Error::new(io::ErrorKind::Other, "is a directory");
        return Err(ParseError::new_source_not_found(path, &e));
    }
    debug!("Opened FASTQ source {}", path.display());
    Ok(f)
}

/// Builds a record stream over any reader with the given options.
/// Gzip, bzip2 and xz input is detected from its first bytes and decompressed
/// on the fly.
#[cfg(feature = "compression")]
pub fn parse_fastq_reader_with<'a, R: 'a + io::Read + Send>(
    reader: R,
    options: ReaderOptions,
) -> Result<Box<dyn RecordStream + 'a>, ParseError> {
    let (magic, reader) = peek_magic(reader)?;
    if magic.starts_with(GZ_MAGIC) {
        debug!("Reading gzip-compressed FASTQ");
        Ok(Box::new(FastqReader::with_options(
            MultiGzDecoder::new(reader),
            options,
        )))
    } else if magic.starts_with(BZ_MAGIC) {
        debug!("Reading bzip2-compressed FASTQ");
        Ok(Box::new(FastqReader::with_options(
            BzDecoder::new(reader),
            options,
        )))
    } else if magic.starts_with(XZ_MAGIC) {
        debug!("Reading xz-compressed FASTQ");
        Ok(Box::new(FastqReader::with_options(
            XzDecoder::new(reader),
            options,
        )))
    } else {
        Ok(Box::new(FastqReader::with_options(reader, options)))
    }
}

/// Builds a record stream over any reader with the given options.
#[cfg(not(feature = "compression"))]
pub fn parse_fastq_reader_with<'a, R: 'a + io::Read + Send>(
    reader: R,
    options: ReaderOptions,
) -> Result<Box<dyn RecordStream + 'a>, ParseError> {
    Ok(Box::new(FastqReader::with_options(reader, options)))
}

/// Builds a lenient record stream over any reader
pub fn parse_fastq_reader<'a, R: 'a + io::Read + Send>(
    reader: R,
) -> Result<Box<dyn RecordStream + 'a>, ParseError> {
    parse_fastq_reader_with(reader, ReaderOptions::default())
}

/// The main entry point for files.
/// Opens the path and returns an iterator-like reader struct owning the file
/// handle; the handle is closed when the reader is dropped.
/// Compressed files are decompressed transparently if the `compression`
/// feature is enabled.
pub fn parse_fastq_file<P: AsRef<Path>>(path: P) -> Result<Box<dyn RecordStream>, ParseError> {
    parse_fastq_file_with(path, ReaderOptions::default())
}

pub fn parse_fastq_file_with<P: AsRef<Path>>(
    path: P,
    options: ReaderOptions,
) -> Result<Box<dyn RecordStream>, ParseError> {
    let f = open_file(path.as_ref())?;
    parse_fastq_reader_with(f, options)
}

/// A FASTQ file that can be read any number of times.
/// Each call to `open` starts an independent pass from the beginning of the
/// file, with its own handle and no state shared with earlier passes.
#[derive(Debug, Clone)]
pub struct FastqSource {
    path: PathBuf,
    options: ReaderOptions,
}

impl FastqSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            options: ReaderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    pub fn open(&self) -> Result<Box<dyn RecordStream>, ParseError> {
        parse_fastq_file_with(&self.path, self.options.clone())
    }

    /// Like `open`, but also returns a handle that aborts the pass: once it is
    /// closed, the stream returns a `SourceClosed` error instead of more records.
    pub fn open_closable(&self) -> Result<(Box<dyn RecordStream>, CloseHandle), ParseError> {
        let f = open_file(&self.path)?;
        let (reader, handle) = ClosableReader::new(f);
        let stream = parse_fastq_reader_with(reader, self.options.clone())?;
        Ok((Box::new(ClosableStream::new(stream, handle.clone())), handle))
    }
}
