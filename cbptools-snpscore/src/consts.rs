pub const DEFAULT_BATCH_SIZE: usize = 64;

/// One-hot channel order.
pub const NUCLEOTIDES: [u8; 4] = [b'A', b'C', b'G', b'T'];

pub const VARIANT_SCORES_FILE: &str = "variant_scores.tsv";
pub const PREDICTIONS_FILE: &str = "predictions_at_snp.bin";
pub const SKIPPED_SNPS_FILE: &str = "skipped_snps.tsv";

pub const VARIANT_SCORES_HEADER: [&str; 8] = [
    "CHR",
    "POS0",
    "REF",
    "ALT",
    "log_counts_diff",
    "log_probs_diff_abs_sum",
    "probs_jsd_diff",
    "META_DATA",
];

pub const SKIPPED_SNPS_HEADER: [&str; 6] = ["CHR", "POS0", "REF", "ALT", "reason", "META_DATA"];
