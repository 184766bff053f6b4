//! All four statistics from a single pass, for callers who don't want to read
//! the file four times.
use crate::parser::FastqRecord;
use crate::quality::PhredEncoding;
use crate::stats::{
    Aggregator, CompositionProfile, CompositionProfiler, LengthCollector, QualityProfile,
    QualityProfiler, Summary, SummaryCounter,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllStats {
    pub summary: Summary,
    pub quality: QualityProfile,
    pub composition: CompositionProfile,
    pub lengths: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct AllStatsAggregator {
    summary: SummaryCounter,
    quality: QualityProfiler,
    composition: CompositionProfiler,
    lengths: LengthCollector,
}

impl AllStatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(encoding: PhredEncoding) -> Self {
        Self {
            quality: QualityProfiler::with_encoding(encoding),
            ..Self::default()
        }
    }
}

impl Aggregator for AllStatsAggregator {
    type Output = AllStats;

    fn update(&mut self, record: &FastqRecord) {
        self.summary.update(record);
        self.quality.update(record);
        self.composition.update(record);
        self.lengths.update(record);
    }

    fn finish(self) -> AllStats {
        AllStats {
            summary: self.summary.finish(),
            quality: self.quality.finish(),
            composition: self.composition.finish(),
            lengths: self.lengths.finish(),
        }
    }
}
