use crate::parser::FastqRecord;
use crate::stats::Aggregator;

/// Collects the sequence length of every record, in file order.
/// Unlike the other aggregators, memory grows with the number of records.
#[derive(Debug, Default)]
pub struct LengthCollector {
    lengths: Vec<usize>,
}

impl LengthCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Aggregator for LengthCollector {
    type Output = Vec<usize>;

    #[inline]
    fn update(&mut self, record: &FastqRecord) {
        self.lengths.push(record.num_bases());
    }

    fn finish(self) -> Vec<usize> {
        self.lengths
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::stats::test_utils::{aggregate, demo_fastq};

    #[test]
    fn test_lengths_in_file_order() {
        let lengths = aggregate(
            b"@a\nACGTA\n+\nIIIII\n@b\n\n+\n\n@c\nAC\n+\nIIIIIIII\n",
            LengthCollector::new(),
        )
        .unwrap();
        assert_eq!(lengths, vec![5, 0, 2]);
    }

    #[test]
    fn test_demo_file() {
        let lengths = aggregate(&demo_fastq(100), LengthCollector::new()).unwrap();
        assert_eq!(lengths, vec![20; 100]);
    }

    #[test]
    fn test_no_records() {
        assert!(aggregate(b"", LengthCollector::new()).unwrap().is_empty());
    }
}
