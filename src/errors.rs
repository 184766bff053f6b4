//! The errors fastq-stats can return while opening or reading a FASTQ source

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::Path;

/// Represents where we were in a file when an error occurred.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorPosition {
    /// Line number where the error occurred (starting with 1)
    pub line: u64,
    /// Byte offset of the start of the offending record
    pub byte: u64,
    /// Index of the offending record within the pass (starting with 0)
    pub record: u64,
    /// ID of record if available
    pub id: Option<String>,
}

impl fmt::Display for ErrorPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(id) = self.id.as_ref() {
            write!(f, "record '{id}' at ")?;
        }
        write!(f, "line {}, byte {}", self.line, self.byte)
    }
}

/// The type of error that occured
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The path could not be opened for reading
    SourceNotFound,
    /// A record is truncated or, in strict mode, otherwise invalid
    MalformedRecord,
    /// The source failed or was closed while a pass was reading it
    SourceClosed,
}

/// The only error type that fastq-stats returns
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// A description of what went wrong
    pub msg: String,
    /// The type of error that occurred
    pub kind: ParseErrorKind,
    /// Position within file
    pub position: ErrorPosition,
}

impl ParseError {
    pub fn new_source_not_found(path: &Path, err: &io::Error) -> Self {
        Self {
            msg: format!("Cannot open '{}': {}", path.display(), err),
            kind: ParseErrorKind::SourceNotFound,
            position: ErrorPosition::default(),
        }
    }

    pub fn new_source_closed(err: &io::Error) -> Self {
        Self {
            msg: err.to_string(),
            kind: ParseErrorKind::SourceClosed,
            position: ErrorPosition::default(),
        }
    }

    pub fn new_truncated(lines_found: u64, position: ErrorPosition) -> Self {
        let msg = format!(
            "Record has {} of 4 lines before the end of input",
            lines_found
        );
        Self::malformed(msg, position)
    }

    pub fn new_invalid_start(byte_found: u8, position: ErrorPosition) -> Self {
        let msg = format!(
            "Expected '@' but found '{}'",
            (byte_found as char).escape_default()
        );
        Self::malformed(msg, position)
    }

    pub fn new_invalid_separator(byte_found: Option<u8>, position: ErrorPosition) -> Self {
        let msg = match byte_found {
            Some(b) => format!(
                "Expected '+' separator but found '{}'",
                (b as char).escape_default()
            ),
            None => String::from("Expected '+' separator but found an empty line"),
        };
        Self::malformed(msg, position)
    }

    pub fn new_unequal_length(seq_len: usize, qual_len: usize, position: ErrorPosition) -> Self {
        let msg = format!(
            "Sequence length is {} but quality length is {}",
            seq_len, qual_len
        );
        Self::malformed(msg, position)
    }

    pub fn new_invalid_quality(q: u8, offset: u8, position: ErrorPosition) -> Self {
        let msg = format!(
            "Quality character '{}' is below the Phred offset {}",
            (q as char).escape_default(),
            offset
        );
        Self::malformed(msg, position)
    }

    pub fn new_trailing_data(position: ErrorPosition) -> Self {
        Self::malformed(
            String::from("Found data after a blank header line"),
            position,
        )
    }

    fn malformed(msg: String, position: ErrorPosition) -> Self {
        Self {
            msg,
            kind: ParseErrorKind::MalformedRecord,
            position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ParseErrorKind::SourceNotFound => write!(f, "{}", self.msg),
            ParseErrorKind::SourceClosed => write!(f, "Source closed mid-pass: {}", self.msg),
            ParseErrorKind::MalformedRecord => write!(f, "{} ({})", self.msg, self.position),
        }
    }
}

/// Any I/O failure after a source was opened aborts the pass.
impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        Self::new_source_closed(&err)
    }
}

impl StdError for ParseError {}
