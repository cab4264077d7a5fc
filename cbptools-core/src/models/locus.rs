use std::cmp::Ordering;
use std::fmt::{self, Display};

/// A single genomic position. Ordered by chromosome name first, then position.
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Locus {
    pub chr: String,
    pub pos: u64,
}

impl Locus {
    pub fn new(chr: &str, pos: u64) -> Self {
        Locus {
            chr: chr.to_string(),
            pos,
        }
    }
}

impl Ord for Locus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chr
            .cmp(&other.chr)
            .then_with(|| self.pos.cmp(&other.pos))
    }
}

impl PartialOrd for Locus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.chr, self.pos)
    }
}
