//! # Input utilities for genomic data.
//!
//! Readers for the external formats the cbptools consume: reference genomes in FASTA format
//! ([GenomeAssembly], [fasta_chrom_sizes]) and, behind the `bigwig` feature, signal tracks in
//! bigWig format ([BigWigSignal]). Both are exposed through the capability traits of
//! `cbptools-core`.
//!
#[cfg(feature = "bigwig")]
pub mod bigwig;
pub mod error;
pub mod genome;

// re-expose core functions
#[cfg(feature = "bigwig")]
pub use bigwig::*;
pub use error::*;
pub use genome::*;
