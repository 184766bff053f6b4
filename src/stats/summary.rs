use crate::parser::FastqRecord;
use crate::stats::Aggregator;

/// Number of records and total number of bases in a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub sequence_count: u64,
    pub total_length: u64,
}

impl Summary {
    /// Mean sequence length, `0.0` for a file without records
    pub fn average_length(&self) -> f64 {
        if self.sequence_count == 0 {
            return 0.0;
        }
        self.total_length as f64 / self.sequence_count as f64
    }
}

#[derive(Debug, Default)]
pub struct SummaryCounter {
    summary: Summary,
}

impl Aggregator for SummaryCounter {
    type Output = Summary;

    #[inline]
    fn update(&mut self, record: &FastqRecord) {
        self.summary.sequence_count += 1;
        self.summary.total_length += record.num_bases() as u64;
    }

    fn finish(self) -> Summary {
        self.summary
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::stats::test_utils::{aggregate, demo_fastq};

    #[test]
    fn test_demo_file() {
        let summary = aggregate(&demo_fastq(100), SummaryCounter::default()).unwrap();
        assert_eq!(summary.sequence_count, 100);
        assert_eq!(summary.total_length, 2000);
        assert_eq!(summary.average_length(), 20.0);
    }

    #[test]
    fn test_uneven_lengths() {
        let summary = aggregate(
            b"@a\nACGTA\n+\nIIIII\n@b\nAC\n+\nII\n@c\n\n+\n\n",
            SummaryCounter::default(),
        )
        .unwrap();
        assert_eq!(summary.sequence_count, 3);
        assert_eq!(summary.total_length, 7);
        assert!((summary.average_length() - 7.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_records() {
        let summary = aggregate(b"", SummaryCounter::default()).unwrap();
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.average_length(), 0.0);
    }

    #[test]
    fn test_length_comes_from_sequence_only() {
        let summary = aggregate(b"@a\nACG\n+\nIIIIIII\n", SummaryCounter::default()).unwrap();
        assert_eq!(summary.total_length, 3);
    }
}
