/// Columns of a narrowPeak row: chr, start, end, name, score, strand, signalValue, pValue, qValue, summit.
pub const NARROWPEAK_COLUMNS: usize = 10;

/// Columns of a SNP row: CHR, POS0, REF, ALT, META_DATA. META_DATA may be omitted.
pub const SNP_COLUMNS: usize = 5;
