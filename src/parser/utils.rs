use std::io;

use memchr::memchr;

use crate::errors::ParseError;
use crate::parser::record::FastqRecord;
use crate::quality::PhredEncoding;

pub(crate) const BUFSIZE: usize = 64 * 1024;
/// Smallest buffer the FASTQ reader works with
pub(crate) const MIN_CAPACITY: usize = 3;

/// Remove trailing whitespace ('\r', spaces, tabs...) from a line
#[inline]
pub(crate) fn trim_end(line: &[u8]) -> &[u8] {
    match line.iter().rposition(|b| !b.is_ascii_whitespace()) {
        Some(last) => &line[..=last],
        None => &line[..0],
    }
}

/// Standard buffer policy: buffer size
/// doubles until it reaches 8 MiB. Above, it will
/// increase in steps of 8 MiB. Buffer size is not limited,
/// it could theoretically grow indefinitely.
pub(crate) fn grow_to(current_size: usize) -> usize {
    if current_size < 1 << 23 {
        current_size * 2
    } else {
        current_size + (1 << 23)
    }
}

/// Makes sure the buffer is full after this call (unless EOF reached)
/// code adapted from `io::Read::read_exact`
pub(crate) fn fill_buf<R>(reader: &mut buffer_redux::BufReader<R>) -> io::Result<usize>
where
    R: io::Read,
{
    let initial_size = reader.buffer().len();
    let mut num_read = 0;
    while initial_size + num_read < reader.capacity() {
        match reader.read_into_buf() {
            Ok(0) => break,
            Ok(n) => num_read += n,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(num_read)
}

/// Holds line number and byte offset of our current state in a parser
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub(crate) line: u64,
    pub(crate) byte: u64,
}

impl Position {
    pub fn new(line: u64, byte: u64) -> Self {
        Self { line, byte }
    }

    /// Line number (starting with 1)
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Byte offset within the file
    pub fn byte(&self) -> u64 {
        self.byte
    }
}

/// Whether it uses \r\n or only \n
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum LineEnding {
    Windows,
    Unix,
}

pub fn find_line_ending(bytes: &[u8]) -> Option<LineEnding> {
    if !bytes.is_empty() {
        if let Some(idx) = memchr(b'\n', bytes) {
            if idx > 0 && bytes[idx - 1] == b'\r' {
                return Some(LineEnding::Windows);
            }

            return Some(LineEnding::Unix);
        }
    }
    None
}

/// How a reader treats records beyond the basic four-line framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Initial buffer capacity, grown when a single record does not fit.
    /// Values below 3 are raised to 3.
    pub capacity: usize,
    /// Reject records with a bad `@`/`+` marker, unequal sequence and quality
    /// lengths, quality characters below the Phred offset, or data after a
    /// blank header line
    pub strict: bool,
    /// Phred offset of the quality lines, checked in strict mode
    pub encoding: PhredEncoding,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            capacity: BUFSIZE,
            strict: false,
            encoding: PhredEncoding::Phred33,
        }
    }
}

impl ReaderOptions {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(MIN_CAPACITY);
        self
    }

    pub fn with_encoding(mut self, encoding: PhredEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// The streaming contract every FASTQ pass goes through: an iterator-like
/// reader yielding one record at a time
pub trait RecordStream: Send {
    /// Gets the next record in the stream.
    /// This imitates the Iterator API but does not support any iterator functions.
    /// This returns None once we reached the EOF or after an error was returned.
    fn next(&mut self) -> Option<Result<FastqRecord<'_>, ParseError>>;
    /// Returns the line/byte at which the current record starts
    fn position(&self) -> &Position;
    /// Returns whether the current stream uses Windows or Unix style line endings
    /// It is `None` only before calling `next`, once a record has been returned it will always
    /// return a line ending.
    fn line_ending(&self) -> Option<LineEnding>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_trim_end() {
        assert_eq!(trim_end(b"ACGT\r"), b"ACGT");
        assert_eq!(trim_end(b"@read 1 \t"), b"@read 1");
        assert_eq!(trim_end(b"  \r"), b"");
        assert_eq!(trim_end(b""), b"");
        assert_eq!(trim_end(b" leading"), b" leading");
    }

    #[test]
    fn test_capacity_has_a_floor() {
        assert_eq!(ReaderOptions::default().with_capacity(0).capacity, 3);
        assert_eq!(ReaderOptions::strict().with_capacity(2).capacity, 3);
        assert_eq!(ReaderOptions::default().with_capacity(10).capacity, 10);
    }

    #[test]
    fn test_find_line_ending() {
        assert_eq!(find_line_ending(b"@a\r\nAC"), Some(LineEnding::Windows));
        assert_eq!(find_line_ending(b"@a\nAC"), Some(LineEnding::Unix));
        assert_eq!(find_line_ending(b"@a"), None);
    }
}
