use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use cbptools_core::models::RegionSet;
use cbptools_io::{BigWigSignal, fasta_chrom_sizes};
use cbptools_splits::{SplitParams, make_splits, splits_path};

pub fn run_splits(matches: &ArgMatches) -> Result<()> {
    let genome = matches
        .get_one::<String>("genome")
        .expect("A path to a genome FASTA is required.");
    let bigwig = matches
        .get_one::<String>("bigwig")
        .expect("A path to a bigWig file is required.");
    let peaks = matches
        .get_one::<String>("peaks")
        .expect("A path to a peaks file is required.");
    let nonpeaks = matches
        .get_one::<String>("nonpeaks")
        .expect("A path to a non-peaks file is required.");
    let output_prefix = matches
        .get_one::<String>("output-prefix")
        .expect("An output prefix is required.");

    // defaults are set on the parser
    let params = SplitParams {
        inputlen: *matches.get_one::<u64>("inputlen").expect("inputlen has a default"),
        outputlen: *matches.get_one::<u64>("outputlen").expect("outputlen has a default"),
        max_jitter: *matches.get_one::<u64>("max-jitter").expect("max-jitter has a default"),
        seed: *matches.get_one::<u64>("seed").expect("seed has a default"),
    };

    let chrom_sizes = fasta_chrom_sizes(Path::new(genome))
        .with_context(|| format!("Failed to read chromosome sizes of {}", genome))?;
    let peaks = RegionSet::try_from(peaks.as_str())?;
    let nonpeaks = RegionSet::try_from(nonpeaks.as_str())?;
    let mut signal = BigWigSignal::open(Path::new(bigwig))?;

    let table = make_splits(&peaks, &nonpeaks, &chrom_sizes, &mut signal, &params)?;

    let output = splits_path(output_prefix);
    table.write_tsv(&output)?;

    for (fold, summary) in table.fold_summary().iter().enumerate() {
        info!(
            "fold{}: {} train, {} valid, {} test",
            fold, summary.train, summary.valid, summary.test
        );
    }
    info!("Wrote {} rows to {}", table.len(), output.display());

    Ok(())
}
