use crate::parser::fastq::BufferPosition;
use crate::parser::utils::{LineEnding, Position};

/// A FASTQ record borrowed from the reader's buffer.
/// It is only valid until the next call to `next` on the reader.
#[derive(Debug, Clone)]
pub struct FastqRecord<'a> {
    buffer: &'a [u8],
    buf_pos: &'a BufferPosition,
    position: &'a Position,
    index: u64,
    line_ending: LineEnding,
}

impl<'a> FastqRecord<'a> {
    pub(crate) fn new(
        buffer: &'a [u8],
        buf_pos: &'a BufferPosition,
        position: &'a Position,
        index: u64,
        line_ending: Option<LineEnding>,
    ) -> Self {
        Self {
            buffer,
            buf_pos,
            position,
            index,
            line_ending: line_ending.unwrap_or(LineEnding::Unix),
        }
    }

    /// Returns the full header line, including the leading `@`
    #[inline]
    pub fn header(&self) -> &[u8] {
        self.buf_pos.header(self.buffer)
    }

    /// Returns the header without its leading `@`
    #[inline]
    pub fn id(&self) -> &[u8] {
        let header = self.header();
        header.strip_prefix(b"@").unwrap_or(header)
    }

    /// Returns the sequence line as raw bytes. Lengths and positions are
    /// counted in bytes; non-ASCII content is neither decoded nor rejected.
    #[inline]
    pub fn seq(&self) -> &[u8] {
        self.buf_pos.seq(self.buffer)
    }

    /// Returns the third line of the record, conventionally just `+`
    #[inline]
    pub fn separator(&self) -> &[u8] {
        self.buf_pos.sep(self.buffer)
    }

    #[inline]
    pub fn qual(&self) -> &[u8] {
        self.buf_pos.qual(self.buffer)
    }

    /// Returns the full record, including line endings. This doesn't include a trailing newline.
    #[inline]
    pub fn all(&self) -> &[u8] {
        self.buf_pos.all(self.buffer)
    }

    /// Length of the sequence line in bytes
    #[inline]
    pub fn num_bases(&self) -> usize {
        self.seq().len()
    }

    /// Index of the record within the current pass (starting with 0)
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Return the line number in the file of the start of the record
    pub fn start_line_number(&self) -> u64 {
        self.position.line
    }

    /// Return the line/byte position of the start of the record
    pub fn position(&self) -> &Position {
        self.position
    }

    /// Which line ending is this record using?
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}
