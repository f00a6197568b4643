//! Static reference data: the regional rule table.

pub mod regions;

pub use regions::RegionTable;
