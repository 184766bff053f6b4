//! The numbers a report or chart layer asks for about one FASTQ file.
use std::path::{Path, PathBuf};

use log::debug;

use crate::errors::ParseError;
use crate::parser::{FastqSource, ReaderOptions};
use crate::quality::PhredEncoding;
use crate::stats::{
    run_pass, Aggregator, AllStats, AllStatsAggregator, CompositionProfile, CompositionProfiler,
    LengthCollector, QualityProfile, QualityProfiler, Summary, SummaryCounter,
};

/// Computes statistics about one FASTQ file, each with its own pass over the
/// file. Only the summary is kept once computed; the positional statistics
/// are returned to the caller and recomputed on each request.
///
/// # Example:
///
/// ```no_run
/// use fastq_stats::FastqAnalyzer;
///
/// let mut analyzer = FastqAnalyzer::new("reads.fastq");
/// println!("{} reads", analyzer.sequence_count()?);
/// for (position, mean) in analyzer.per_position_quality()?.iter() {
///     println!("{}\t{:.2}", position + 1, mean);
/// }
/// # Ok::<(), fastq_stats::ParseError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FastqAnalyzer {
    source: FastqSource,
    encoding: PhredEncoding,
    summary: Option<Summary>,
}

impl FastqAnalyzer {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self::from_source(FastqSource::new(path))
    }

    pub fn from_source(source: FastqSource) -> Self {
        let encoding = source.options().encoding;
        Self {
            source,
            encoding,
            summary: None,
        }
    }

    pub fn with_options<P: Into<PathBuf>>(path: P, options: ReaderOptions) -> Self {
        Self::from_source(FastqSource::new(path).with_options(options))
    }

    pub fn path(&self) -> &Path {
        self.source.path()
    }

    fn pass<A: Aggregator>(&self, aggregator: A) -> Result<A::Output, ParseError> {
        debug!("Starting a pass over {}", self.source.path().display());
        let mut reader = self.source.open()?;
        run_pass(&mut *reader, aggregator)
    }

    /// Record count and total length, computed on the first call only
    pub fn summary(&mut self) -> Result<Summary, ParseError> {
        if let Some(summary) = self.summary {
            return Ok(summary);
        }
        let summary = self.pass(SummaryCounter::default())?;
        self.summary = Some(summary);
        Ok(summary)
    }

    pub fn sequence_count(&mut self) -> Result<u64, ParseError> {
        Ok(self.summary()?.sequence_count)
    }

    /// Mean read length, `0.0` for a file without records
    pub fn average_length(&mut self) -> Result<f64, ParseError> {
        Ok(self.summary()?.average_length())
    }

    pub fn per_position_quality(&self) -> Result<QualityProfile, ParseError> {
        self.pass(QualityProfiler::with_encoding(self.encoding))
    }

    pub fn per_position_composition(&self) -> Result<CompositionProfile, ParseError> {
        self.pass(CompositionProfiler::new())
    }

    pub fn all_lengths(&self) -> Result<Vec<usize>, ParseError> {
        self.pass(LengthCollector::new())
    }

    /// Every statistic from one pass. Also fills the cached summary.
    pub fn analyze_all(&mut self) -> Result<AllStats, ParseError> {
        let all = self.pass(AllStatsAggregator::with_encoding(self.encoding))?;
        self.summary = Some(all.summary);
        Ok(all)
    }
}
