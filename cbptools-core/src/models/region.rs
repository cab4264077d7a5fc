use std::fmt::{self, Display};

use crate::models::Locus;

///
/// Region struct, representation of one row of a narrowPeak file
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    pub summit: u32,
}

impl Region {
    ///
    /// Absolute position of the summit: `start + summit`
    ///
    pub fn position(&self) -> u64 {
        self.start as u64 + self.summit as u64
    }

    pub fn locus(&self) -> Locus {
        Locus {
            chr: self.chr.clone(),
            pos: self.position(),
        }
    }

    pub fn as_string(&self) -> String {
        format!("{}\t{}\t{}\t{}", self.chr, self.start, self.end, self.summit)
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
