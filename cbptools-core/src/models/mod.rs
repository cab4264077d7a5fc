pub mod locus;
pub mod region;
pub mod region_set;
pub mod snp;
pub mod snp_set;

// re-export for cleaner imports
pub use self::locus::Locus;
pub use self::region::Region;
pub use self::region_set::RegionSet;
pub use self::snp::SnpRecord;
pub use self::snp_set::SnpSet;
