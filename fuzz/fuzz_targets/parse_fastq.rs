#![no_main]
use libfuzzer_sys::fuzz_target;

use std::io::Cursor;

use fastq_stats::stats::{run_pass, AllStatsAggregator};
use fastq_stats::{parse_fastq_reader_with, ReaderOptions};

fuzz_target!(|data: &[u8]| {
    for options in [ReaderOptions::default(), ReaderOptions::strict().with_capacity(3)] {
        let cursor = Cursor::new([&b"@"[..], data].concat());
        if let Ok(mut reader) = parse_fastq_reader_with(cursor, options) {
            let _ = run_pass(&mut *reader, AllStatsAggregator::new());
        }
    }
});
