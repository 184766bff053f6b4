use crate::parser::FastqRecord;
use crate::stats::Aggregator;

/// The four nucleotides the composition profile reports on
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Base {
    A,
    C,
    G,
    T,
}

impl Base {
    pub const ALL: [Base; 4] = [Base::A, Base::C, Base::G, Base::T];

    /// Case-insensitive; anything other than ACGT (N, IUPAC codes, gaps) is `None`
    #[inline]
    pub fn from_byte(b: u8) -> Option<Self> {
        match b.to_ascii_uppercase() {
            b'A' => Some(Base::A),
            b'C' => Some(Base::C),
            b'G' => Some(Base::G),
            b'T' => Some(Base::T),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Counts A, C, G and T at each read position.
#[derive(Debug, Default)]
pub struct CompositionProfiler {
    counts: Vec<[u64; 4]>,
}

impl CompositionProfiler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Aggregator for CompositionProfiler {
    type Output = CompositionProfile;

    fn update(&mut self, record: &FastqRecord) {
        for (i, &b) in record.seq().iter().enumerate() {
            if let Some(base) = Base::from_byte(b) {
                if i >= self.counts.len() {
                    self.counts.resize(i + 1, [0; 4]);
                }
                self.counts[i][base.index()] += 1;
            }
        }
    }

    fn finish(self) -> CompositionProfile {
        let positions = self
            .counts
            .iter()
            .map(BaseComposition::from_counts)
            .collect();
        CompositionProfile { positions }
    }
}

/// Percentage of each base among the recognized bases at one position.
/// All four are 0 if no read had an A, C, G or T there.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BaseComposition {
    pub a: f64,
    pub c: f64,
    pub g: f64,
    pub t: f64,
}

impl BaseComposition {
    fn from_counts(counts: &[u64; 4]) -> Self {
        let total: u64 = counts.iter().sum();
        if total == 0 {
            return Self::default();
        }
        let pct = |n: u64| n as f64 / total as f64 * 100.0;
        Self {
            a: pct(counts[0]),
            c: pct(counts[1]),
            g: pct(counts[2]),
            t: pct(counts[3]),
        }
    }

    pub fn get(&self, base: Base) -> f64 {
        match base {
            Base::A => self.a,
            Base::C => self.c,
            Base::G => self.g,
            Base::T => self.t,
        }
    }

    pub fn total(&self) -> f64 {
        self.a + self.c + self.g + self.t
    }
}

/// Base composition for every position from 0 to the last one holding an
/// A, C, G or T in any read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositionProfile {
    positions: Vec<BaseComposition>,
}

impl CompositionProfile {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn at(&self, position: usize) -> Option<&BaseComposition> {
        self.positions.get(position)
    }

    /// `(position, composition)` pairs, positions starting at 0
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BaseComposition)> + '_ {
        self.positions.iter().enumerate()
    }

    /// The percentage series of one base across all positions
    pub fn series(&self, base: Base) -> Vec<f64> {
        self.positions.iter().map(|c| c.get(base)).collect()
    }
}
