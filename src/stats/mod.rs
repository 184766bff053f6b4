//! Single-pass aggregators over a FASTQ record stream.
//!
//! Each aggregator owns its accumulators, sees every record of exactly one
//! pass through [`run_pass`] and is then turned into a read-only result. If the
//! pass fails, the partially filled aggregator is dropped with it.
use log::trace;

use crate::errors::ParseError;
use crate::parser::{FastqRecord, RecordStream};

pub mod combined;
pub mod composition;
pub mod length;
pub mod quality;
pub mod summary;

pub use combined::{AllStats, AllStatsAggregator};
pub use composition::{Base, BaseComposition, CompositionProfile, CompositionProfiler};
pub use length::LengthCollector;
pub use quality::{QualityProfile, QualityProfiler};
pub use summary::{Summary, SummaryCounter};

/// Something that can be fed the records of one pass and then finalized.
pub trait Aggregator {
    type Output;

    fn update(&mut self, record: &FastqRecord);

    fn finish(self) -> Self::Output;
}

/// Feeds every record of `reader` to `aggregator` and returns its result.
/// The first error aborts the pass.
pub fn run_pass<S: RecordStream + ?Sized, A: Aggregator>(
    reader: &mut S,
    mut aggregator: A,
) -> Result<A::Output, ParseError> {
    let mut n_records: u64 = 0;
    while let Some(record) = reader.next() {
        aggregator.update(&record?);
        n_records += 1;
    }
    trace!("Pass finished after {} records", n_records);
    Ok(aggregator.finish())
}
