pub const N_FOLDS: usize = 5;

pub const DEFAULT_INPUTLEN: u64 = 2114;
pub const DEFAULT_OUTPUTLEN: u64 = 1000;
pub const DEFAULT_MAX_JITTER: u64 = 500;
pub const DEFAULT_SEED: u64 = 1234;

pub const SPLITS_SUFFIX: &str = ".splits.tsv";
pub const SPLITS_HEADER: [&str; 2 + N_FOLDS] =
    ["chr", "pos", "fold0", "fold1", "fold2", "fold3", "fold4"];
