use crate::parser::FastqRecord;
use crate::quality::PhredEncoding;
use crate::stats::Aggregator;

/// Accumulates the quality scores seen at each read position.
///
/// Characters are decoded without range checks: anything below the offset
/// simply contributes a negative score.
#[derive(Debug, Default)]
pub struct QualityProfiler {
    encoding: PhredEncoding,
    sums: Vec<i64>,
    counts: Vec<u64>,
}

impl QualityProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(encoding: PhredEncoding) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }
}

impl Aggregator for QualityProfiler {
    type Output = QualityProfile;

    fn update(&mut self, record: &FastqRecord) {
        let qual = record.qual();
        if qual.len() > self.sums.len() {
            self.sums.resize(qual.len(), 0);
            self.counts.resize(qual.len(), 0);
        }
        for (i, &q) in qual.iter().enumerate() {
            self.sums[i] += i64::from(self.encoding.score(q));
            self.counts[i] += 1;
        }
    }

    fn finish(self) -> QualityProfile {
        let means = self
            .sums
            .iter()
            .zip(&self.counts)
            .map(|(&sum, &count)| {
                if count == 0 {
                    0.0
                } else {
                    sum as f64 / count as f64
                }
            })
            .collect();
        QualityProfile { means }
    }
}

/// Mean quality score for every position from 0 to the last one seen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityProfile {
    means: Vec<f64>,
}

impl QualityProfile {
    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    pub fn mean(&self, position: usize) -> Option<f64> {
        self.means.get(position).copied()
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// `(position, mean_quality)` pairs, positions starting at 0
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.means.iter().copied().enumerate()
    }
}
