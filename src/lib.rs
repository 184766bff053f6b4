#![crate_name = "fastq_stats"]
pub mod analyzer;
pub mod errors;
pub mod parser;
pub mod quality;
pub mod stats;

pub use analyzer::FastqAnalyzer;
pub use errors::{ErrorPosition, ParseError, ParseErrorKind};
pub use parser::{
    parse_fastq_file, parse_fastq_file_with, parse_fastq_reader, parse_fastq_reader_with,
    FastqRecord, FastqSource, ReaderOptions, RecordStream,
};
pub use quality::PhredEncoding;
pub use stats::{run_pass, Aggregator};
