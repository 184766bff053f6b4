/// Encoding for quality scores
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PhredEncoding {
    #[default]
    Phred33,
    Phred64,
}

impl PhredEncoding {
    /// ASCII value that encodes a quality score of 0
    #[inline]
    pub fn offset(&self) -> u8 {
        match self {
            Self::Phred33 => b'!',
            Self::Phred64 => b'@',
        }
    }

    /// Decodes a single quality character without range checking.
    /// Characters below the offset give negative scores.
    #[inline]
    pub fn score(&self, q: u8) -> i32 {
        i32::from(q) - i32::from(self.offset())
    }

    /// Returns the first character of `qual` that lies below the offset, if any.
    pub fn find_invalid(&self, qual: &[u8]) -> Option<u8> {
        let offset = self.offset();
        qual.iter().copied().find(|&q| q < offset)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_score_phred33() {
        let scores: Vec<i32> = b"#</</BBFFFBF<"
            .iter()
            .map(|&q| PhredEncoding::Phred33.score(q))
            .collect();
        assert_eq!(scores, vec![2, 27, 14, 27, 14, 33, 33, 37, 37, 37, 33, 37, 27]);
    }

    #[test]
    fn test_score_phred64() {
        let scores: Vec<i32> = b"B[N[Naaeeeae["
            .iter()
            .map(|&q| PhredEncoding::Phred64.score(q))
            .collect();
        assert_eq!(scores, vec![2, 27, 14, 27, 14, 33, 33, 37, 37, 37, 33, 37, 27]);
    }

    #[test]
    fn test_score_below_offset_is_negative() {
        assert_eq!(PhredEncoding::Phred33.score(b' '), -1);
        assert_eq!(PhredEncoding::Phred64.score(b'?'), -1);
    }

    #[test]
    fn test_find_invalid() {
        assert_eq!(PhredEncoding::Phred33.find_invalid(b"#</</BBFFFBF "), Some(b' '));
        assert_eq!(PhredEncoding::Phred33.find_invalid(b"IIII"), None);
        assert_eq!(PhredEncoding::Phred64.find_invalid(b"B[N[Naaeeeae?"), Some(b'?'));
    }
}
