//! # cbptools
//!
//! Helper tools around base-resolution chromatin accessibility models. Each tool lives in
//! its own crate and is re-exported here behind a feature of the same name:
//!
//! - `core`: region, variant and capability types
//! - `io`: FASTA genomes and bigWig signal tracks
//! - `splits`: chromosome-aware cross-validation fold splits
//! - `snpscore`: variant effect scoring
//! - `jobs`: job manifest rendering
#[cfg(feature = "core")]
#[doc(inline)]
pub use cbptools_core as core;

#[cfg(feature = "io")]
#[doc(inline)]
pub use cbptools_io as io;

#[cfg(feature = "splits")]
#[doc(inline)]
pub use cbptools_splits as splits;

#[cfg(feature = "snpscore")]
#[doc(inline)]
pub use cbptools_snpscore as snpscore;

#[cfg(feature = "jobs")]
#[doc(inline)]
pub use cbptools_jobs as jobs;
