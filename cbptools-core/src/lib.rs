//! # Core models for cbptools
//!
//! Shared building blocks for the ChromBPNet helper tools: narrowPeak regions, summit loci,
//! SNP records, the capability traits the tools are written against ([traits::SignalTrack],
//! [traits::SequenceSource]) and small file utilities.
//!
pub mod consts;
pub mod errors;
pub mod models;
pub mod traits;
pub mod utils;
