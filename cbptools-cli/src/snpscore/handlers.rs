use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;
use log::info;

use cbptools_core::models::SnpSet;
use cbptools_io::GenomeAssembly;
use cbptools_snpscore::{LinearConvModel, score_snps};

pub fn run_snpscore(matches: &ArgMatches) -> Result<()> {
    let snp_data = matches
        .get_one::<String>("snp-data")
        .expect("A path to the SNP data is required.");
    let genome = matches
        .get_one::<String>("genome")
        .expect("A path to a genome FASTA is required.");
    let model = matches
        .get_one::<String>("model")
        .expect("A path to a model is required.");
    let output_dir = matches
        .get_one::<String>("output-dir")
        .expect("An output directory is required.");
    let batch_size = *matches
        .get_one::<usize>("batch-size")
        .expect("batch-size has a default");

    let output_dir = Path::new(output_dir);
    if !output_dir.is_dir() {
        anyhow::bail!("Output directory does not exist: {}", output_dir.display());
    }

    let model = LinearConvModel::from_file(Path::new(model))?;
    let snps = SnpSet::try_from(snp_data.as_str())?;
    info!("Read {} SNPs from {}", snps.len(), snp_data);
    let genome = GenomeAssembly::try_from(genome.as_str())?;

    let summary = score_snps(&snps, &genome, &model, batch_size, output_dir)?;

    info!(
        "Scored {} SNPs ({} skipped); predictions archived in {}",
        summary.n_scored,
        summary.n_skipped,
        summary.predictions.display()
    );

    Ok(())
}
