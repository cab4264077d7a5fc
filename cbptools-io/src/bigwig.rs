use std::collections::HashMap;
use std::path::Path;

use bigtools::BigWigRead;
use bigtools::utils::reopen::ReopenableFile;
use log::info;

use cbptools_core::errors::SignalError;
use cbptools_core::traits::SignalTrack;

use crate::error::{GenomeIoError, Result};

///
/// A bigWig file exposed as a [SignalTrack].
///
pub struct BigWigSignal {
    reader: BigWigRead<ReopenableFile>,
    chrom_sizes: HashMap<String, u64>,
}

impl BigWigSignal {
    pub fn open(path: &Path) -> Result<Self> {
        let path_str = path
            .to_str()
            .ok_or_else(|| GenomeIoError::InvalidPath(path.display().to_string()))?;

        let reader = BigWigRead::open_file(path_str).map_err(|e| GenomeIoError::BigWigOpen {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let chrom_sizes: HashMap<String, u64> = reader
            .chroms()
            .iter()
            .map(|c| (c.name.clone(), c.length as u64))
            .collect();

        info!(
            "Opened bigWig {} with {} chromosomes",
            path.display(),
            chrom_sizes.len()
        );

        Ok(BigWigSignal {
            reader,
            chrom_sizes,
        })
    }
}

impl SignalTrack for BigWigSignal {
    fn chrom_len(&self, chrom: &str) -> Option<u64> {
        self.chrom_sizes.get(chrom).copied()
    }

    fn values(&mut self, chrom: &str, start: u64, end: u64) -> std::result::Result<Vec<f32>, SignalError> {
        self.reader
            .values(chrom, start as u32, end as u32)
            .map_err(|e| SignalError::ReadError(format!("{}:{}-{}: {}", chrom, start, end, e)))
    }
}
