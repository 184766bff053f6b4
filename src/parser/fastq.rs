//! The buffer handling is adapted from https://github.com/markschl/seq_io/blob/master/src/fastq.rs

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use crate::errors::{ErrorPosition, ParseError};
use crate::parser::record::FastqRecord;
use crate::parser::utils::{
    fill_buf, find_line_ending, grow_to, trim_end, LineEnding, Position, ReaderOptions,
    RecordStream, MIN_CAPACITY,
};
use memchr::memchr;

/// Represents the position of a record within a buffer
#[derive(Debug, Clone, Default)]
pub struct BufferPosition {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) seq: usize,
    pub(crate) sep: usize,
    pub(crate) qual: usize,
}

impl BufferPosition {
    #[inline]
    pub(crate) fn is_new(&self) -> bool {
        self.end == 0
    }

    #[inline]
    pub(crate) fn len(&self) -> u64 {
        (self.end + 1 - self.start) as u64
    }

    #[inline]
    pub(crate) fn header<'a>(&'a self, buffer: &'a [u8]) -> &'a [u8] {
        trim_end(&buffer[self.start..self.seq - 1])
    }

    #[inline]
    pub(crate) fn seq<'a>(&'a self, buffer: &'a [u8]) -> &'a [u8] {
        trim_end(&buffer[self.seq..self.sep - 1])
    }

    #[inline]
    pub(crate) fn sep<'a>(&'a self, buffer: &'a [u8]) -> &'a [u8] {
        trim_end(&buffer[self.sep..self.qual - 1])
    }

    #[inline]
    pub(crate) fn qual<'a>(&'a self, buffer: &'a [u8]) -> &'a [u8] {
        trim_end(&buffer[self.qual..self.end])
    }

    #[inline]
    fn find_line_ending<'a>(&'a self, buffer: &'a [u8]) -> Option<LineEnding> {
        find_line_ending(self.all(buffer))
    }

    #[inline]
    pub(crate) fn all<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        &buffer[self.start..self.end]
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
enum SearchPosition {
    Id,
    Sequence,
    Separator,
    Quality,
}

/// Parser for FASTQ files.
/// Only use this directly if you know your file is not compressed as
/// it does not handle decompression.
/// If you are unsure, it's better to use [`parse_fastq_file`](fn.parse_fastq_file.html).
pub struct Reader<R: io::Read> {
    buf_reader: buffer_redux::BufReader<R>,
    buf_pos: BufferPosition,
    search_pos: SearchPosition,
    position: Position,
    index: u64,
    finished: bool,
    line_ending: Option<LineEnding>,
    options: ReaderOptions,
}

impl<R> Reader<R>
where
    R: io::Read,
{
    /// Creates a new lenient reader with the default buffer size of 64 KiB
    ///
    /// # Example:
    ///
    /// ```
    /// use fastq_stats::parser::{FastqReader, RecordStream};
    /// let fastq = b"@id\nACGT\n+\nIIII";
    ///
    /// let mut reader = FastqReader::new(&fastq[..]);
    /// let record = reader.next().unwrap().unwrap();
    /// assert_eq!(record.id(), b"id")
    /// ```
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ReaderOptions::default())
    }

    /// Creates a new reader with a given buffer capacity. Capacities below 3
    /// are raised to 3.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self::with_options(reader, ReaderOptions::default().with_capacity(capacity))
    }

    pub fn with_options(reader: R, options: ReaderOptions) -> Self {
        let capacity = options.capacity.max(MIN_CAPACITY);
        Self {
            buf_reader: buffer_redux::BufReader::with_capacity(capacity, reader),
            buf_pos: BufferPosition::default(),
            search_pos: SearchPosition::Id,
            position: Position::new(1, 0),
            index: 0,
            finished: false,
            line_ending: None,
            options,
        }
    }
}

impl Reader<File> {
    /// Creates a reader from a file path.
    ///
    /// # Example:
    ///
    /// ```no_run
    /// use fastq_stats::parser::{FastqReader, RecordStream};
    ///
    /// let mut reader = FastqReader::from_path("reads.fastq").unwrap();
    ///
    /// // (... do something with the reader)
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let path = path.as_ref();
        File::open(path)
            .map(Self::new)
            .map_err(|e| ParseError::new_source_not_found(path, &e))
    }
}

impl<R> Reader<R>
where
    R: io::Read,
{
    #[inline]
    fn get_buf(&self) -> &[u8] {
        self.buf_reader.buffer()
    }

    /// Locates the four lines of the current record and returns true if found.
    /// Returns false if incomplete because end of buffer reached,
    /// meaning that the last record may be incomplete.
    /// Updates `self.search_pos`.
    fn find(&mut self) -> bool {
        self.buf_pos.seq = if let Some(p) = self.find_line(self.buf_pos.start) {
            p
        } else {
            self.search_pos = SearchPosition::Id;
            return false;
        };

        self.buf_pos.sep = if let Some(p) = self.find_line(self.buf_pos.seq) {
            p
        } else {
            self.search_pos = SearchPosition::Sequence;
            return false;
        };

        self.buf_pos.qual = if let Some(p) = self.find_line(self.buf_pos.sep) {
            p
        } else {
            self.search_pos = SearchPosition::Separator;
            return false;
        };

        self.buf_pos.end = if let Some(p) = self.find_line(self.buf_pos.qual) {
            p - 1
        } else {
            self.search_pos = SearchPosition::Quality;
            return false;
        };

        true
    }

    // Resumes reading an incomplete record without
    // re-searching positions that were already found.
    // The resulting position may still be incomplete (-> false).
    fn find_incomplete(&mut self) -> bool {
        if self.search_pos == SearchPosition::Id {
            self.buf_pos.seq = if let Some(p) = self.find_line(self.buf_pos.start) {
                p
            } else {
                self.search_pos = SearchPosition::Id;
                return false;
            };
        }

        if self.search_pos <= SearchPosition::Sequence {
            self.buf_pos.sep = if let Some(p) = self.find_line(self.buf_pos.seq) {
                p
            } else {
                self.search_pos = SearchPosition::Sequence;
                return false;
            };
        }

        if self.search_pos <= SearchPosition::Separator {
            self.buf_pos.qual = if let Some(p) = self.find_line(self.buf_pos.sep) {
                p
            } else {
                self.search_pos = SearchPosition::Separator;
                return false;
            };
        }

        if self.search_pos <= SearchPosition::Quality {
            self.buf_pos.end = if let Some(p) = self.find_line(self.buf_pos.qual) {
                p - 1
            } else {
                self.search_pos = SearchPosition::Quality;
                return false;
            };
        }

        self.search_pos = SearchPosition::Id;

        true
    }

    /// Strict mode only, verify that the record is valid:
    /// - header starts with @
    /// - separator line starts with +
    /// - quality and sequence have the same length
    /// - no quality char is below the Phred offset
    fn validate(&self) -> Result<(), ParseError> {
        if !self.options.strict {
            return Ok(());
        }
        let buf = self.get_buf();
        let header = self.buf_pos.header(buf);

        if let Some(&start_byte) = header.first() {
            if start_byte != b'@' {
                return Err(ParseError::new_invalid_start(
                    start_byte,
                    self.get_error_pos(0, header),
                ));
            }
        }

        let sep = self.buf_pos.sep(buf);
        if sep.first() != Some(&b'+') {
            return Err(ParseError::new_invalid_separator(
                sep.first().copied(),
                self.get_error_pos(2, header),
            ));
        }

        let seq_len = self.buf_pos.seq(buf).len();
        let qual = self.buf_pos.qual(buf);
        if seq_len != qual.len() {
            return Err(ParseError::new_unequal_length(
                seq_len,
                qual.len(),
                self.get_error_pos(3, header),
            ));
        }

        if let Some(q) = self.options.encoding.find_invalid(qual) {
            return Err(ParseError::new_invalid_quality(
                q,
                self.options.encoding.offset(),
                self.get_error_pos(3, header),
            ));
        }
        Ok(())
    }

    fn get_error_pos(&self, line_offset: u64, header: &[u8]) -> ErrorPosition {
        let header = trim_end(header);
        let id = header
            .strip_prefix(b"@")
            .unwrap_or(header)
            .split(|b| b.is_ascii_whitespace())
            .next()
            .unwrap_or_default();
        ErrorPosition {
            line: self.position.line() + line_offset,
            byte: self.position.byte(),
            record: self.index,
            id: if id.is_empty() {
                None
            } else {
                Some(String::from_utf8_lossy(id).into())
            },
        }
    }

    #[inline]
    fn find_line(&self, search_start: usize) -> Option<usize> {
        memchr(b'\n', &self.get_buf()[search_start..]).map(|pos| search_start + pos + 1)
    }

    /// Called when we couldn't find a complete record.
    /// We might be at EOF, buffer might be too small or we need to refill it
    fn next_complete(&mut self) -> Result<bool, ParseError> {
        loop {
            if self.get_buf().len() < self.buf_reader.capacity() {
                // EOF reached, there will be no next record
                return self.check_end();
            }

            if self.buf_pos.start == 0 {
                // first record already incomplete -> buffer too small
                self.grow();
            } else {
                // not the first record -> buffer may be big enough but we need to make some space
                self.make_room();
            }

            fill_buf(&mut self.buf_reader)?;

            if self.find_incomplete() {
                return Ok(true);
            }
        }
    }

    /// Checks for EOF.
    /// If there is one last record that can be sent, return `true` otherwise `false`.
    fn check_end(&mut self) -> Result<bool, ParseError> {
        self.finished = true;
        let buf = self.get_buf();
        let header_end = if self.search_pos > SearchPosition::Id {
            self.buf_pos.seq - 1
        } else {
            buf.len()
        };
        let header = &buf[self.buf_pos.start..header_end];

        // A blank first line means the input is over
        if trim_end(header).is_empty() {
            if self.options.strict {
                self.ensure_blank_remainder()?;
            }
            return Ok(false);
        }

        if self.search_pos == SearchPosition::Quality && self.buf_pos.qual < buf.len() {
            // no line ending at end of last record
            self.buf_pos.end = buf.len();
            return Ok(true);
        }

        let partial_start = match self.search_pos {
            SearchPosition::Id => self.buf_pos.start,
            SearchPosition::Sequence => self.buf_pos.seq,
            SearchPosition::Separator => self.buf_pos.sep,
            SearchPosition::Quality => self.buf_pos.qual,
        };
        let lines_found = self.search_pos as u64 + u64::from(partial_start < buf.len());
        Err(ParseError::new_truncated(
            lines_found,
            self.get_error_pos(0, header),
        ))
    }

    /// Called once a blank header line ended the stream in strict mode:
    /// everything left in the source must be whitespace.
    fn ensure_blank_remainder(&mut self) -> Result<(), ParseError> {
        let mut line = self.position.line();
        let mut byte = self.position.byte();
        loop {
            let rest = &self.get_buf()[self.buf_pos.start..];
            if let Some(idx) = rest.iter().position(|b| !b.is_ascii_whitespace()) {
                return Err(ParseError::new_trailing_data(ErrorPosition {
                    line: line + bytecount::count(&rest[..idx], b'\n') as u64,
                    byte: byte + idx as u64,
                    record: self.index,
                    id: None,
                }));
            }
            line += bytecount::count(rest, b'\n') as u64;
            byte += rest.len() as u64;

            let consumed = self.get_buf().len();
            self.buf_reader.consume(consumed);
            self.buf_reader.make_room();
            self.buf_pos = BufferPosition::default();
            if fill_buf(&mut self.buf_reader)? == 0 {
                return Ok(());
            }
        }
    }

    // Grow the internal buffer. Used if the original buffer is not big
    // enough for a record
    fn grow(&mut self) {
        let cap = self.buf_reader.capacity();
        let new_size = grow_to(cap);
        let additional = new_size - cap;
        self.buf_reader.reserve(additional);
    }

    // Consume bytes from records we've seen and move incomplete bytes to start of buffer
    fn make_room(&mut self) {
        let consumed = self.buf_pos.start;
        self.buf_reader.consume(consumed);
        self.buf_reader.make_room();

        self.buf_pos.start = 0;

        if self.search_pos >= SearchPosition::Sequence {
            self.buf_pos.seq -= consumed;
        }
        if self.search_pos >= SearchPosition::Separator {
            self.buf_pos.sep -= consumed;
        }
        if self.search_pos >= SearchPosition::Quality {
            self.buf_pos.qual -= consumed;
        }
    }

    fn fail(&mut self, e: ParseError) -> Option<Result<FastqRecord<'_>, ParseError>> {
        self.finished = true;
        Some(Err(e))
    }
}

impl<R: io::Read + Send> RecordStream for Reader<R> {
    fn next(&mut self) -> Option<Result<FastqRecord<'_>, ParseError>> {
        // No more records to read
        if self.finished {
            return None;
        }

        // Empty buffer, let's fill it
        if self.get_buf().is_empty() {
            match fill_buf(&mut self.buf_reader) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => return self.fail(e.into()),
            };
        }

        // If we already did look at a record, let's setup for the next one
        if !self.buf_pos.is_new() {
            self.position.byte += self.buf_pos.len();
            self.position.line += 4;
            self.index += 1;
            self.buf_pos.start = self.buf_pos.end + 1;
        }

        // If it's not complete, try to fetch more from the buffer until we have it in full
        if !self.find() {
            match self.next_complete() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => return self.fail(e),
            }
        }

        // A blank header line ends the stream, whatever follows it
        if self.buf_pos.header(self.get_buf()).is_empty() {
            self.finished = true;
            if self.options.strict {
                if let Err(e) = self.ensure_blank_remainder() {
                    return Some(Err(e));
                }
            }
            return None;
        }

        if let Err(e) = self.validate() {
            return self.fail(e);
        }

        if self.line_ending.is_none() {
            self.line_ending = self.buf_pos.find_line_ending(self.get_buf());
        }
        // We got one!
        Some(Ok(FastqRecord::new(
            self.get_buf(),
            &self.buf_pos,
            &self.position,
            self.index,
            self.line_ending,
        )))
    }

    fn position(&self) -> &Position {
        &self.position
    }

    fn line_ending(&self) -> Option<LineEnding> {
        self.line_ending
    }
}
