use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bio::io::fasta;
use log::{debug, info};

use cbptools_core::errors::BoundsError;
use cbptools_core::traits::SequenceSource;
use cbptools_core::utils::{check_bounds, get_chrom_sizes, get_dynamic_reader};

use crate::error::{GenomeIoError, Result};

///
/// A reference genome held in memory, one byte vector per sequence.
///
pub struct GenomeAssembly {
    seq_map: HashMap<String, Vec<u8>>,
}

impl TryFrom<&str> for GenomeAssembly {
    type Error = GenomeIoError;

    fn try_from(value: &str) -> Result<Self> {
        GenomeAssembly::try_from(Path::new(value))
    }
}

impl TryFrom<String> for GenomeAssembly {
    type Error = GenomeIoError;

    fn try_from(value: String) -> Result<Self> {
        GenomeAssembly::try_from(Path::new(&value))
    }
}

impl TryFrom<&Path> for GenomeAssembly {
    type Error = GenomeIoError;

    ///
    /// Create a new [GenomeAssembly] from a fasta file (optionally gzipped)
    ///
    fn try_from(value: &Path) -> Result<GenomeAssembly> {
        info!("Loading genome from {}", value.display());

        let reader = get_dynamic_reader(value)?;
        let genome = fasta::Reader::new(reader);

        let mut seq_map: HashMap<String, Vec<u8>> = HashMap::new();
        for record in genome.records() {
            let record = record.map_err(|e| GenomeIoError::FastaParse {
                path: value.display().to_string(),
                reason: e.to_string(),
            })?;

            let name = record.id().to_string();
            debug!("Read sequence {} ({} bp)", name, record.seq().len());
            if seq_map.insert(name.clone(), record.seq().to_owned()).is_some() {
                return Err(GenomeIoError::DuplicateSequence(name));
            }
        }

        if seq_map.is_empty() {
            return Err(GenomeIoError::FastaParse {
                path: value.display().to_string(),
                reason: String::from("no sequences found"),
            });
        }

        Ok(GenomeAssembly { seq_map })
    }
}

impl From<HashMap<String, Vec<u8>>> for GenomeAssembly {
    fn from(seq_map: HashMap<String, Vec<u8>>) -> Self {
        GenomeAssembly { seq_map }
    }
}

impl GenomeAssembly {
    pub fn contains_chr(&self, chr: &str) -> bool {
        self.seq_map.contains_key(chr)
    }

    pub fn len(&self) -> usize {
        self.seq_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq_map.is_empty()
    }
}

impl SequenceSource for GenomeAssembly {
    fn chrom_len(&self, chrom: &str) -> Option<u64> {
        self.seq_map.get(chrom).map(|s| s.len() as u64)
    }

    fn fetch(&self, chrom: &str, start: i64, end: i64) -> std::result::Result<&[u8], BoundsError> {
        let seq = self
            .seq_map
            .get(chrom)
            .ok_or_else(|| BoundsError::UnknownChromosome(chrom.to_string()))?;
        let (start, end) = check_bounds(chrom, start, end, seq.len() as u64)?;
        Ok(&seq[start as usize..end as usize])
    }
}

fn fai_path(fasta: &Path) -> PathBuf {
    let mut name = fasta.as_os_str().to_owned();
    name.push(".fai");
    PathBuf::from(name)
}

///
/// Chromosome lengths of a FASTA file. Uses the `.fai` index next to the file when
/// there is one, otherwise streams the sequences once without keeping them.
///
pub fn fasta_chrom_sizes(path: &Path) -> Result<HashMap<String, u64>> {
    let index = fai_path(path);
    if index.is_file() {
        debug!("Reading chromosome sizes from {}", index.display());
        return get_chrom_sizes(&index).map_err(|e| GenomeIoError::FastaParse {
            path: index.display().to_string(),
            reason: e.to_string(),
        });
    }

    debug!("No fasta index found, scanning {}", path.display());
    let reader = get_dynamic_reader(path)?;
    let mut sizes = HashMap::new();
    for record in fasta::Reader::new(reader).records() {
        let record = record.map_err(|e| GenomeIoError::FastaParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        sizes.insert(record.id().to_string(), record.seq().len() as u64);
    }

    if sizes.is_empty() {
        return Err(GenomeIoError::FastaParse {
            path: path.display().to_string(),
            reason: String::from("no sequences found"),
        });
    }

    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn path_to_genome() -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/genome/genome.fa")
    }

    #[rstest]
    fn test_load_genome(path_to_genome: PathBuf) {
        let genome = GenomeAssembly::try_from(path_to_genome.as_path()).unwrap();

        assert_eq!(genome.len(), 2);
        assert!(genome.contains_chr("chr1"));
        assert_eq!(genome.chrom_len("chr1"), Some(10000));
        assert_eq!(genome.chrom_len("chr2"), Some(8000));
    }

    #[rstest]
    fn test_fetch_matches_snp_reference(path_to_genome: PathBuf) {
        let genome = GenomeAssembly::try_from(path_to_genome.as_path()).unwrap();

        // chr1:50 is a G in the fixture genome, see tests/data/snps/snps.tsv
        assert_eq!(genome.fetch("chr1", 50, 51).unwrap(), b"G");
        assert_eq!(genome.fetch("chr1", 0, 10000).unwrap().len(), 10000);
    }

    #[rstest]
    fn test_fetch_out_of_bounds(path_to_genome: PathBuf) {
        let genome = GenomeAssembly::try_from(path_to_genome.as_path()).unwrap();

        assert!(matches!(
            genome.fetch("chr1", 9990, 10040),
            Err(BoundsError::OutOfBounds { chrom_len: 10000, .. })
        ));
        assert!(matches!(
            genome.fetch("chr1", -30, 70),
            Err(BoundsError::OutOfBounds { .. })
        ));
        assert!(matches!(
            genome.fetch("chr3", 0, 1),
            Err(BoundsError::UnknownChromosome(_))
        ));
    }

    #[rstest]
    fn test_chrom_sizes_from_index_and_scan(path_to_genome: PathBuf) {
        let from_index = fasta_chrom_sizes(&path_to_genome).unwrap();

        let tempdir = tempfile::tempdir().unwrap();
        let copied = tempdir.path().join("genome.fa");
        std::fs::copy(&path_to_genome, &copied).unwrap();
        let from_scan = fasta_chrom_sizes(&copied).unwrap();

        assert_eq!(from_index, from_scan);
        assert_eq!(from_scan["chr1"], 10000);
    }

    #[rstest]
    fn test_duplicate_sequences_fail() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("dup.fa");
        std::fs::write(&path, ">chr1\nACGT\n>chr1\nACGT\n").unwrap();

        assert!(matches!(
            GenomeAssembly::try_from(path.as_path()),
            Err(GenomeIoError::DuplicateSequence(_))
        ));
    }
}
