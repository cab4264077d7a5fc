use std::fmt::{self, Display};

///
/// A single nucleotide variant to be scored: the allele is inserted at the
/// 0-based position `pos0` of chromosome `chr`.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnpRecord {
    pub chr: String,
    pub pos0: u64,
    pub ref_allele: String,
    pub alt_allele: String,
    pub meta_data: String,
}

impl SnpRecord {
    ///
    /// Identifier of the variant: `CHR_POS0_REF_ALT`
    ///
    pub fn id(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.chr, self.pos0, self.ref_allele, self.alt_allele
        )
    }

    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.chr, self.pos0, self.ref_allele, self.alt_allele, self.meta_data
        )
    }
}

impl Display for SnpRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
