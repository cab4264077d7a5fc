use clap::{Arg, Command};

use cbptools_splits::consts::{
    DEFAULT_INPUTLEN, DEFAULT_MAX_JITTER, DEFAULT_OUTPUTLEN, DEFAULT_SEED,
};

pub const SPLITS_CMD: &str = "splits";

/// Creates the fold splits CLI Command object
pub fn create_splits_cli() -> Command {
    Command::new(SPLITS_CMD)
        .about("Split peaks and non-peaks into five train/valid/test folds, keeping nearby regions together.")
        .arg(
            Arg::new("genome")
                .long("genome")
                .short('g')
                .help("Genome FASTA; chromosome lengths are read from <genome>.fai when present")
                .required(true),
        )
        .arg(
            Arg::new("bigwig")
                .long("bigwig")
                .short('b')
                .help("bigWig signal track used to weigh region groups")
                .required(true),
        )
        .arg(
            Arg::new("peaks")
                .long("peaks")
                .short('p')
                .help("Peaks in narrowPeak format")
                .required(true),
        )
        .arg(
            Arg::new("nonpeaks")
                .long("nonpeaks")
                .short('n')
                .help("Non-peak background regions in narrowPeak format")
                .required(true),
        )
        .arg(
            Arg::new("output-prefix")
                .long("output-prefix")
                .short('o')
                .help("Output prefix, the table is written to <prefix>.splits.tsv")
                .required(true),
        )
        .arg(
            Arg::new("inputlen")
                .long("inputlen")
                .value_parser(clap::value_parser!(u64))
                .default_value(DEFAULT_INPUTLEN.to_string())
                .help("Model input length"),
        )
        .arg(
            Arg::new("outputlen")
                .long("outputlen")
                .value_parser(clap::value_parser!(u64))
                .default_value(DEFAULT_OUTPUTLEN.to_string())
                .help("Model output length"),
        )
        .arg(
            Arg::new("max-jitter")
                .long("max-jitter")
                .short('j')
                .value_parser(clap::value_parser!(u64))
                .default_value(DEFAULT_MAX_JITTER.to_string())
                .help("Maximum jitter applied to regions during training"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(clap::value_parser!(u64))
                .default_value(DEFAULT_SEED.to_string())
                .help("Seed for the fold assignment"),
        )
}
