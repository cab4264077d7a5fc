use clap::{Arg, Command};

use cbptools_snpscore::consts::DEFAULT_BATCH_SIZE;

pub const SNPSCORE_CMD: &str = "snpscore";

/// Creates the variant effect scoring CLI Command object
pub fn create_snpscore_cli() -> Command {
    Command::new(SNPSCORE_CMD)
        .about("Score the effect of SNPs on predicted accessibility profiles and counts.")
        .arg(
            Arg::new("snp-data")
                .long("snp-data")
                .short('i')
                .help("TSV without header: chr, 0-based position to insert the allele, ref allele, alt allele, optional metadata")
                .required(true),
        )
        .arg(
            Arg::new("genome")
                .long("genome")
                .short('g')
                .help("Genome FASTA")
                .required(true),
        )
        .arg(
            Arg::new("model")
                .long("model")
                .short('m')
                .help("Path to the model JSON")
                .required(true),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .help("Directory for the scores and predictions, must already exist")
                .required(true),
        )
        .arg(
            Arg::new("batch-size")
                .long("batch-size")
                .value_parser(clap::value_parser!(usize))
                .default_value(DEFAULT_BATCH_SIZE.to_string())
                .help("Number of SNPs per model call"),
        )
}
